//! Burst suppression of identical alerts within a time window.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Alert deduplicator — suppresses identical alerts fired in rapid
/// succession before they reach the native facility.
///
/// Alert tags embed timestamps and never collapse at the OS level, so this
/// window is the only thing standing between a chatty backend and a stack
/// of identical popups.
#[derive(Debug)]
pub struct AlertDeduplicator {
    /// Window duration.
    window: Duration,
    /// Last dispatch time per key.
    last_seen: Mutex<HashMap<String, Instant>>,
}

impl AlertDeduplicator {
    /// Create a new deduplicator with the given window.
    pub fn new(window_ms: u64) -> Self {
        Self {
            window: Duration::from_millis(window_ms),
            last_seen: Mutex::new(HashMap::new()),
        }
    }

    /// Check if an alert should be dispatched or suppressed.
    ///
    /// Returns `true` if the alert should proceed, `false` if an identical
    /// alert was dispatched within the window.
    pub fn should_dispatch(&self, key: &str) -> bool {
        let mut map = self.last_seen.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();

        if let Some(last) = map.get(key) {
            if now.duration_since(*last) < self.window {
                return false; // Too recent — suppress
            }
        }

        map.insert(key.to_string(), now);
        true
    }

    /// Clean up old entries.
    pub fn cleanup(&self) {
        let mut map = self.last_seen.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let cutoff = self.window * 10;
        map.retain(|_, v| now.duration_since(*v) < cutoff);
    }
}
