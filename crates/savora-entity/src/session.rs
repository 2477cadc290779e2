//! Authenticated session value object.

use std::collections::HashSet;
use std::str::FromStr;

use savora_core::config::session::SessionConfig;
use savora_core::types::{RestaurantId, StaffId};
use savora_core::{AppError, AppResult};

use crate::staff::StaffRole;

/// An authenticated viewer session, consumed by the sync client.
///
/// Authentication itself happens elsewhere; the sync client only needs the
/// scope, the viewer, the viewer's roles, and a token to present on REST
/// and channel connections.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Restaurant scope of this session.
    pub restaurant_id: RestaurantId,
    /// The viewing staff member.
    pub staff_id: StaffId,
    /// The viewer's role set. May be empty for accounts with no role
    /// assignment; the alert filter fails open in that case.
    pub roles: HashSet<StaffRole>,
    /// Auth token for REST and channel connections.
    pub token: String,
}

impl AuthSession {
    /// Build a session from the daemon's bootstrap configuration.
    pub fn from_config(config: &SessionConfig) -> AppResult<Self> {
        let restaurant_id = RestaurantId::from_str(&config.restaurant_id)
            .map_err(|e| AppError::session(format!("Invalid restaurant id: {e}")))?;
        let staff_id = StaffId::from_str(&config.staff_id)
            .map_err(|e| AppError::session(format!("Invalid staff id: {e}")))?;

        let mut roles = HashSet::new();
        for name in config.roles.split(',') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            roles.insert(name.parse::<StaffRole>()?);
        }

        Ok(Self {
            restaurant_id,
            staff_id,
            roles,
            token: config.token.clone(),
        })
    }

    /// Render the role set as a stable, comma-separated connection parameter.
    pub fn roles_param(&self) -> String {
        let mut names: Vec<&str> = self.roles.iter().map(StaffRole::as_str).collect();
        names.sort_unstable();
        names.join(",")
    }
}
