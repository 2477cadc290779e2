//! Wire types for the back-office API envelope.

use serde::Deserialize;

use savora_core::{AppError, AppResult};
use savora_entity::NotificationRecord;

/// The API's standard `{status, data}` response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Response status string.
    pub status: String,
    /// Response payload; absent on error responses.
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, treating an `"error"` status or a missing
    /// payload as an external-service failure.
    pub fn into_data(self) -> AppResult<T> {
        match self.data {
            Some(data) if self.status != "error" => Ok(data),
            _ => Err(AppError::external_service(format!(
                "API returned status '{}'",
                self.status
            ))),
        }
    }
}

/// Payload of `GET notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationListData {
    /// Records on this page.
    #[serde(default)]
    pub notifications: Vec<NotificationRecord>,
    /// Total records across all pages.
    #[serde(default)]
    pub total: u64,
}

/// Payload of `GET notifications/unread-count`.
#[derive(Debug, Deserialize)]
pub struct UnreadCountData {
    /// Unread count; the API emits this as a number or a numeric string.
    pub count: CountValue,
}

/// A count that tolerates both numeric and string encodings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CountValue {
    /// Numeric encoding.
    Number(u64),
    /// String encoding, e.g. `"5"`.
    Text(String),
}

impl CountValue {
    /// Coerce to `u64`, if the value parses.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success() {
        let envelope: ApiEnvelope<UnreadCountData> =
            serde_json::from_str(r#"{"status":"success","data":{"count":7}}"#).expect("parse");
        let data = envelope.into_data().expect("data present");
        assert_eq!(data.count.as_u64(), Some(7));
    }

    #[test]
    fn test_envelope_error_status() {
        let envelope: ApiEnvelope<UnreadCountData> =
            serde_json::from_str(r#"{"status":"error","data":null}"#).expect("parse");
        assert!(envelope.into_data().is_err());
    }

    #[test]
    fn test_string_count_coerced() {
        let envelope: ApiEnvelope<UnreadCountData> =
            serde_json::from_str(r#"{"status":"success","data":{"count":"12"}}"#).expect("parse");
        let data = envelope.into_data().expect("data present");
        assert_eq!(data.count.as_u64(), Some(12));
    }

    #[test]
    fn test_unparseable_count() {
        let value: CountValue = serde_json::from_str(r#""many""#).expect("parse");
        assert_eq!(value.as_u64(), None);
    }
}
