//! Ephemeral alert configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Native alert delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    /// How long an alert stays on screen before auto-dismissing, in seconds.
    #[serde(default = "default_auto_dismiss")]
    pub auto_dismiss_seconds: u64,
    /// Grace delay before the one-time permission request, in seconds.
    #[serde(default = "default_permission_grace")]
    pub permission_grace_seconds: u64,
    /// Burst-suppression window for identical alerts, in milliseconds.
    #[serde(default = "default_dedup_window")]
    pub dedup_window_ms: u64,
}

impl AlertsConfig {
    /// Return the auto-dismiss duration.
    pub fn auto_dismiss(&self) -> Duration {
        Duration::from_secs(self.auto_dismiss_seconds)
    }

    /// Return the permission grace delay.
    pub fn permission_grace(&self) -> Duration {
        Duration::from_secs(self.permission_grace_seconds)
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            auto_dismiss_seconds: default_auto_dismiss(),
            permission_grace_seconds: default_permission_grace(),
            dedup_window_ms: default_dedup_window(),
        }
    }
}

fn default_auto_dismiss() -> u64 {
    6
}

fn default_permission_grace() -> u64 {
    3
}

fn default_dedup_window() -> u64 {
    500
}
