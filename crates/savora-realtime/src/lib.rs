//! # savora-realtime
//!
//! Realtime notification synchronization engine for the Savora back-office
//! dashboard. Provides:
//!
//! - Reconnecting, heartbeated push channel sessions (count + event channels)
//! - Role-aware noise filtering for ephemeral alerts
//! - Alert composition from raw domain event payloads
//! - Permission- and visibility-gated native alert delivery
//! - The client-side notification store (history, tabs, unread count)
//! - The sync orchestrator that binds everything to the session lifecycle

pub mod alert;
pub mod channel;
pub mod orchestrator;
pub mod store;
pub mod visibility;

pub use alert::composer::AlertContent;
pub use alert::sink::AlertSink;
pub use channel::session::ChannelSession;
pub use channel::types::{ChannelKind, ChannelState, PushMessage};
pub use orchestrator::SyncOrchestrator;
pub use store::NotificationStore;
pub use visibility::Visibility;
