//! Notification delivery status enumeration.

use serde::{Deserialize, Serialize};

/// Server-owned delivery/read lifecycle marker of a notification.
///
/// The client never writes this field; the only client-side read mutation
/// is flipping [`read_at`](super::NotificationRecord::read_at).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// Record created, not yet pushed.
    Created,
    /// Pushed to at least one recipient.
    Sent,
    /// Push delivery failed.
    Failed,
    /// Read by the recipient.
    Read,
}

impl DeliveryStatus {
    /// Return the status as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::Read => "read",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
