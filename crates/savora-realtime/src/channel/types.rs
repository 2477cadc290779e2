//! Push channel type definitions.

use serde::Deserialize;

/// The two logical push channels.
///
/// Both share the reconnect/heartbeat policy but have independent
/// lifecycles and independent message handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Carries unread-count updates only.
    Count,
    /// Carries arbitrary domain events.
    Events,
}

impl ChannelKind {
    /// Endpoint path for this channel, relative to the push base address.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Count => "ws/notifications",
            Self::Events => "ws/events",
        }
    }

    /// Return the channel name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Events => "events",
        }
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Connection state of a channel session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelState {
    /// No connection; a reconnect may be pending.
    #[default]
    Disconnected,
    /// A connection attempt is in flight.
    Connecting,
    /// The connection is established.
    Open,
}

/// A parsed inbound push message.
///
/// The event channel emits the payload under either a `data` or a
/// `payload` key depending on backend version; both are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct PushMessage {
    /// Event discriminator, e.g. `kot_created` or `notifications_unread`.
    pub event: String,
    /// Event payload; `Null` when the message carries none.
    #[serde(default, alias = "data")]
    pub payload: serde_json::Value,
}

impl PushMessage {
    /// Extract the unread count from a count-channel message.
    ///
    /// The backend emits the count as a number or a numeric string.
    pub fn unread_count(&self) -> Option<u64> {
        match self.payload.get("count") {
            Some(serde_json::Value::Number(n)) => n.as_u64(),
            Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payload_key() {
        let msg: PushMessage =
            serde_json::from_str(r#"{"event":"notifications_unread","payload":{"count":5}}"#)
                .expect("parse");
        assert_eq!(msg.event, "notifications_unread");
        assert_eq!(msg.unread_count(), Some(5));
    }

    #[test]
    fn test_parse_data_key() {
        let msg: PushMessage =
            serde_json::from_str(r#"{"event":"kot_created","data":{"table_name":"T4"}}"#)
                .expect("parse");
        assert_eq!(msg.event, "kot_created");
        assert_eq!(msg.payload["table_name"], "T4");
    }

    #[test]
    fn test_missing_payload_defaults_to_null() {
        let msg: PushMessage = serde_json::from_str(r#"{"event":"pong"}"#).expect("parse");
        assert!(msg.payload.is_null());
        assert_eq!(msg.unread_count(), None);
    }

    #[test]
    fn test_string_count_coerced() {
        let msg: PushMessage =
            serde_json::from_str(r#"{"event":"notifications_unread","payload":{"count":"8"}}"#)
                .expect("parse");
        assert_eq!(msg.unread_count(), Some(8));
    }

    #[test]
    fn test_garbage_count_dropped() {
        let msg: PushMessage =
            serde_json::from_str(r#"{"event":"notifications_unread","payload":{"count":"lots"}}"#)
                .expect("parse");
        assert_eq!(msg.unread_count(), None);
    }
}
