//! Notification kind enumeration.

use serde::{Deserialize, Serialize};

/// Coarse category of a notification, used as the client-side tab filter.
///
/// The wire value is an open string; values the client does not recognize
/// deserialize to [`NotificationKind::Unknown`] and simply never match a
/// tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Order lifecycle notifications.
    Order,
    /// Kitchen order ticket notifications.
    Kot,
    /// Inventory and stock notifications.
    Inventory,
    /// System-level notifications.
    System,
    /// Any kind this client version does not recognize.
    #[serde(other)]
    Unknown,
}

impl NotificationKind {
    /// Return the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Kot => "kot",
            Self::Inventory => "inventory",
            Self::System => "system",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
