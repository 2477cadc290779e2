//! Notifications gateway trait — the REST seam the sync client consumes.

use async_trait::async_trait;

use savora_core::result::AppResult;
use savora_entity::NotificationRecord;

/// One page of notification history.
#[derive(Debug, Clone)]
pub struct NotificationPage {
    /// Records on this page, newest first (server ordering).
    pub notifications: Vec<NotificationRecord>,
    /// Total records available across all pages.
    pub total: u64,
}

/// Trait for the back-office notification endpoints.
///
/// [`BackofficeClient`](crate::BackofficeClient) implements this against
/// the real API; tests substitute in-memory fakes.
#[async_trait]
pub trait NotificationsGateway: Send + Sync + 'static {
    /// Fetch a page of notification history.
    async fn list(&self, skip: u64, limit: u64) -> AppResult<NotificationPage>;

    /// Fetch the authoritative unread count.
    async fn unread_count(&self) -> AppResult<u64>;

    /// Mark every notification in scope as read.
    async fn mark_all_read(&self) -> AppResult<()>;
}
