//! Authenticated session bootstrap configuration.
//!
//! The sync client does not perform authentication itself; it consumes a
//! session established elsewhere. For the headless daemon that session is
//! injected through this configuration section (typically via `SAVORA__`
//! environment variables).

use serde::{Deserialize, Serialize};

/// Session bootstrap values for the headless client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Restaurant scope identifier (UUID).
    pub restaurant_id: String,
    /// Staff member (viewer) identifier (UUID).
    pub staff_id: String,
    /// Comma-separated role names, e.g. `"kitchen,admin"`.
    #[serde(default)]
    pub roles: String,
    /// Auth token presented on REST and channel connections.
    pub token: String,
}
