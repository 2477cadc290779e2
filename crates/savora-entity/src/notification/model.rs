//! Notification record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use savora_core::types::{NotificationId, RestaurantId, StaffId};

use super::kind::NotificationKind;
use super::status::DeliveryStatus;

/// One row of persisted notification history.
///
/// Records are created server-side and arrive via REST page fetches. The
/// client never mutates a record except flipping `read_at` on
/// mark-all-read; records are never deleted client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Unique, server-assigned, immutable identifier.
    pub id: NotificationId,
    /// The restaurant this notification is scoped to.
    pub restaurant_id: RestaurantId,
    /// The intended recipient, if targeted (lookup only, no ownership).
    pub target_user_id: Option<StaffId>,
    /// The staff member whose action produced the notification.
    pub actor_id: Option<StaffId>,
    /// Coarse category, used as the client-side tab filter.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Server-owned delivery/read lifecycle marker.
    pub status: DeliveryStatus,
    /// Fine-grained event name, e.g. `kot_created`.
    pub event: String,
    /// Pre-rendered title; content is derived from `payload` when absent.
    pub title: Option<String>,
    /// Pre-rendered body; content is derived from `payload` when absent.
    pub body: Option<String>,
    /// Type of the domain object the notification concerns (weak reference).
    pub entity_type: Option<String>,
    /// Identifier of the domain object the notification concerns.
    pub entity_id: Option<String>,
    /// Free-form structured data whose shape depends on `event`.
    pub payload: Option<serde_json::Value>,
    /// Server-side targeting hint; not enforced client-side.
    pub target_department: Option<String>,
    /// Server-side targeting hint; not enforced client-side.
    pub target_roles: Option<Vec<String>>,
    /// Creation timestamp, immutable.
    pub created_at: DateTime<Utc>,
    /// Read timestamp; null → timestamp once, never reverted.
    pub read_at: Option<DateTime<Utc>>,
}

impl NotificationRecord {
    /// Check whether the record is unread.
    pub fn is_unread(&self) -> bool {
        self.read_at.is_none()
    }

    /// Mark the record as read now, if it is not already.
    ///
    /// `read_at` is monotonic: a non-null value is never overwritten.
    pub fn mark_read(&mut self, at: DateTime<Utc>) {
        if self.read_at.is_none() {
            self.read_at = Some(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> NotificationRecord {
        NotificationRecord {
            id: NotificationId::new(),
            restaurant_id: RestaurantId::new(),
            target_user_id: None,
            actor_id: None,
            kind: NotificationKind::Kot,
            status: DeliveryStatus::Sent,
            event: "kot_created".to_string(),
            title: None,
            body: None,
            entity_type: None,
            entity_id: None,
            payload: None,
            target_department: None,
            target_roles: None,
            created_at: Utc::now(),
            read_at: None,
        }
    }

    #[test]
    fn test_mark_read_is_monotonic() {
        let mut r = record();
        assert!(r.is_unread());

        let first = Utc::now();
        r.mark_read(first);
        assert_eq!(r.read_at, Some(first));

        let later = first + chrono::Duration::seconds(60);
        r.mark_read(later);
        assert_eq!(r.read_at, Some(first), "read_at must never be overwritten");
    }

    #[test]
    fn test_deserialize_partial_record() {
        let json = serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "restaurant_id": uuid::Uuid::new_v4(),
            "type": "order",
            "status": "sent",
            "event": "order_status_changed",
            "created_at": Utc::now(),
        });
        let record: NotificationRecord =
            serde_json::from_value(json).expect("optional fields default");
        assert_eq!(record.kind, NotificationKind::Order);
        assert!(record.is_unread());
    }
}
