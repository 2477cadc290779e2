//! Back-office REST API configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// REST API connection configuration.
///
/// The push endpoint base address is derived from `base_url` by protocol
/// substitution (`http` → `ws`, `https` → `wss`); there is no separate
/// realtime address to configure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the back-office API, e.g. `https://api.savora.app/v1`.
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Page size for notification history fetches.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl ApiConfig {
    /// Return the request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Derive the push endpoint base address by protocol substitution.
    pub fn push_base_url(&self) -> String {
        if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.base_url.clone()
        }
    }
}

fn default_timeout() -> u64 {
    15
}

fn default_page_size() -> u64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_base_url_substitution() {
        let config = ApiConfig {
            base_url: "https://api.savora.app/v1".to_string(),
            timeout_seconds: 15,
            page_size: 20,
        };
        assert_eq!(config.push_base_url(), "wss://api.savora.app/v1");

        let config = ApiConfig {
            base_url: "http://localhost:8080".to_string(),
            timeout_seconds: 15,
            page_size: 20,
        };
        assert_eq!(config.push_base_url(), "ws://localhost:8080");
    }
}
