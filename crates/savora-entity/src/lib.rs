//! # savora-entity
//!
//! Domain entity models for the Savora back-office sync client. Every
//! struct in this crate represents a server-owned record or a domain value
//! object. All entities derive `Debug`, `Clone`, `Serialize`, and
//! `Deserialize`.

pub mod notification;
pub mod session;
pub mod staff;

pub use notification::{DeliveryStatus, NotificationKind, NotificationRecord};
pub use session::AuthSession;
pub use staff::StaffRole;
