//! Permission- and visibility-gated native alert delivery.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{info, trace, warn};

use savora_core::config::alerts::AlertsConfig;
use savora_core::traits::{NativeAlert, Notifier, PermissionState};

use super::composer::AlertContent;
use super::dedup::AlertDeduplicator;
use crate::visibility::Visibility;

/// Delivers composed alerts to the platform's native alert facility.
///
/// Count-driven alerts fire only when the unread count increased since the
/// last observation and the window is hidden (a visible window already
/// shows the badge). Event-driven alerts fire on any permitted, filtered
/// event regardless of visibility — kitchen events are time-sensitive.
pub struct AlertSink {
    /// Native alert capability.
    notifier: Arc<dyn Notifier>,
    /// Delivery settings.
    config: AlertsConfig,
    /// Burst suppression for identical event alerts.
    dedup: AlertDeduplicator,
    /// Last observed unread count; `None` until the first observation.
    last_count: Mutex<Option<u64>>,
    /// Whether the one-time permission request has been made.
    prompted: AtomicBool,
}

impl std::fmt::Debug for AlertSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertSink").finish()
    }
}

impl AlertSink {
    /// Create a sink over the given notifier.
    pub fn new(notifier: Arc<dyn Notifier>, config: AlertsConfig) -> Self {
        let dedup = AlertDeduplicator::new(config.dedup_window_ms);
        Self {
            notifier,
            config,
            dedup,
            last_count: Mutex::new(None),
            prompted: AtomicBool::new(false),
        }
    }

    /// Request notification permission once, if it has never been decided.
    ///
    /// Called after a grace delay on session start so the user sees the app
    /// before being prompted. A denied state is final — never re-prompted.
    pub async fn ensure_permission(&self) {
        match self.notifier.permission() {
            PermissionState::Default => {
                if self.prompted.swap(true, Ordering::SeqCst) {
                    return;
                }
                let state = self.notifier.request_permission().await;
                info!(state = ?state, "notification permission requested");
            }
            PermissionState::Denied => {
                trace!("notification permission denied; not re-prompting");
            }
            _ => {}
        }
    }

    /// Record an unread-count observation, alerting on a hidden-window
    /// increase.
    ///
    /// Every observation updates the baseline, whether or not an alert is
    /// dispatched. The first observation only seeds the baseline.
    pub async fn observe_count(&self, count: u64, visibility: Visibility) {
        let increased = {
            let mut last = self.last_count.lock().unwrap_or_else(|e| e.into_inner());
            let increased = last.is_some_and(|prev| count > prev);
            *last = Some(count);
            increased
        };

        if !increased {
            trace!(count, "unread count did not increase");
            return;
        }
        if !visibility.is_hidden() {
            trace!(count, "window visible; in-app badge covers the update");
            return;
        }
        if self.notifier.permission() != PermissionState::Granted {
            trace!(count, "no notification permission; skipping count alert");
            return;
        }

        self.dispatch(
            "unread",
            AlertContent {
                title: "Savora".to_string(),
                body: format!("You have {count} unread notifications"),
            },
        )
        .await;
    }

    /// Dispatch a composed event alert, subject to permission and burst
    /// suppression. No visibility gate.
    pub async fn publish_event(&self, event: &str, content: AlertContent) {
        if self.notifier.permission() != PermissionState::Granted {
            trace!(event, "no notification permission; skipping event alert");
            return;
        }

        let key = format!("{event}:{}:{}", content.title, content.body);
        if !self.dedup.should_dispatch(&key) {
            trace!(event, "alert deduplicated");
            return;
        }

        self.dispatch(event, content).await;
    }

    /// Drop stale burst-suppression entries. Called from the background
    /// poll tick.
    pub fn maintain(&self) {
        self.dedup.cleanup();
    }

    async fn dispatch(&self, slug: &str, content: AlertContent) {
        // Timestamped tag: rapid alerts never replace each other at the OS
        // level.
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let alert = NativeAlert {
            tag: format!("savora-{slug}-{nanos}"),
            title: content.title,
            body: content.body,
            auto_dismiss: self.config.auto_dismiss(),
        };

        if let Err(e) = self.notifier.show(alert).await {
            warn!(error = %e, "native alert dispatch failed");
        }
    }
}
