//! Logging stand-in for the native notification facility.
//!
//! The headless daemon has no OS notification surface; alerts are rendered
//! as structured log lines instead. Desktop shells substitute their own
//! [`Notifier`] implementation.

use async_trait::async_trait;
use tracing::info;

use savora_core::AppResult;
use savora_core::traits::{NativeAlert, Notifier, PermissionState};

/// Notifier that writes alerts to the log.
#[derive(Debug)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn permission(&self) -> PermissionState {
        PermissionState::Granted
    }

    async fn request_permission(&self) -> PermissionState {
        PermissionState::Granted
    }

    async fn show(&self, alert: NativeAlert) -> AppResult<()> {
        info!(
            tag = %alert.tag,
            title = %alert.title,
            body = %alert.body,
            "alert"
        );
        Ok(())
    }
}
