//! Channel connection parameters.

use savora_core::config::api::ApiConfig;
use savora_entity::AuthSession;

use super::types::ChannelKind;

/// Parameters encoded into a channel connection URL.
///
/// Both channels carry the same identity: restaurant scope, viewer,
/// viewer roles, and the auth token, as query parameters.
#[derive(Debug, Clone)]
pub struct ConnectParams {
    /// Push base address (REST base with the protocol substituted).
    base: String,
    /// Restaurant scope id.
    restaurant_id: String,
    /// Viewer staff id.
    staff_id: String,
    /// Comma-separated viewer roles.
    roles: String,
    /// Auth token.
    token: String,
}

impl ConnectParams {
    /// Build connection parameters for an authenticated session.
    pub fn for_session(api: &ApiConfig, session: &AuthSession) -> Self {
        Self {
            base: api.push_base_url().trim_end_matches('/').to_string(),
            restaurant_id: session.restaurant_id.to_string(),
            staff_id: session.staff_id.to_string(),
            roles: session.roles_param(),
            token: session.token.clone(),
        }
    }

    /// Render the full connection URL for one channel.
    pub fn url(&self, kind: ChannelKind) -> String {
        format!(
            "{}/{}?restaurant_id={}&user_id={}&role={}&token={}",
            self.base,
            kind.path(),
            self.restaurant_id,
            self.staff_id,
            self.roles,
            self.token
        )
    }
}
