//! Native notification capability trait.
//!
//! The platform shell (desktop wrapper, browser bridge, or the headless
//! daemon's logging stand-in) implements [`Notifier`]; the sync client only
//! ever talks to this trait.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Permission state of the platform's native notification facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// The platform has no native notification facility.
    Unsupported,
    /// Permission has not been requested yet.
    Default,
    /// The user denied permission; never re-prompt.
    Denied,
    /// Permission granted; alerts may be dispatched.
    Granted,
}

/// A composed alert ready for native delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeAlert {
    /// Platform-level identity tag. Tags embed a high-resolution timestamp,
    /// so rapid same-titled alerts never replace each other.
    pub tag: String,
    /// Alert title.
    pub title: String,
    /// Alert body text.
    pub body: String,
    /// How long the alert stays on screen before auto-dismissing.
    pub auto_dismiss: Duration,
}

/// Trait for the platform's native alert facility.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Return the current permission state.
    fn permission(&self) -> PermissionState;

    /// Prompt the user for notification permission.
    ///
    /// Returns the resulting state. Callers must not invoke this when the
    /// current state is [`PermissionState::Denied`].
    async fn request_permission(&self) -> PermissionState;

    /// Display an alert.
    async fn show(&self, alert: NativeAlert) -> AppResult<()>;
}
