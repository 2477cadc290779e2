//! Push channel configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Push channel (WebSocket) configuration shared by both logical channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Keep-alive ping interval in seconds.
    #[serde(default = "default_heartbeat_interval")]
    pub heartbeat_interval_seconds: u64,
    /// Fixed delay before a reconnect attempt, in seconds.
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_seconds: u64,
    /// Background unread-count poll interval in seconds.
    #[serde(default = "default_poll_interval")]
    pub unread_poll_interval_seconds: u64,
    /// Stagger between the two channel connection attempts, in milliseconds.
    #[serde(default = "default_connect_stagger")]
    pub connect_stagger_ms: u64,
    /// Internal buffer size for inbound channel messages.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl RealtimeConfig {
    /// Return the heartbeat interval as a [`Duration`].
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_seconds)
    }

    /// Return the reconnect delay as a [`Duration`].
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_seconds)
    }

    /// Return the unread poll interval as a [`Duration`].
    pub fn unread_poll_interval(&self) -> Duration {
        Duration::from_secs(self.unread_poll_interval_seconds)
    }

    /// Return the connect stagger as a [`Duration`].
    pub fn connect_stagger(&self) -> Duration {
        Duration::from_millis(self.connect_stagger_ms)
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_seconds: default_heartbeat_interval(),
            reconnect_delay_seconds: default_reconnect_delay(),
            unread_poll_interval_seconds: default_poll_interval(),
            connect_stagger_ms: default_connect_stagger(),
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

fn default_heartbeat_interval() -> u64 {
    30
}

fn default_reconnect_delay() -> u64 {
    5
}

fn default_poll_interval() -> u64 {
    30
}

fn default_connect_stagger() -> u64 {
    250
}

fn default_channel_buffer() -> usize {
    256
}
