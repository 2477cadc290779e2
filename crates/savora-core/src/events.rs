//! Well-known domain event names carried on the push channels.
//!
//! Event names are open strings on the wire; the constants here cover the
//! events the client composes alerts for or treats specially.

/// A new kitchen order ticket was created.
pub const KOT_CREATED: &str = "kot_created";
/// Legacy spelling of [`KOT_CREATED`] still emitted by older backends.
pub const KOT: &str = "kot";
/// A kitchen order ticket was updated.
pub const KOT_UPDATED: &str = "kot_updated";
/// A kitchen order ticket was deleted.
pub const KOT_DELETED: &str = "kot_deleted";
/// A kitchen order ticket was rejected by a station.
pub const KOT_REJECTED: &str = "kot_rejected";
/// Generic order event, redundant with the finer-grained `kot_*`/`order_*`
/// events and always suppressed for ephemeral alerts.
pub const ORDER: &str = "order";
/// A new order was placed.
pub const ORDER_CREATED: &str = "order_created";
/// An order moved to a new status.
pub const ORDER_STATUS_CHANGED: &str = "order_status_changed";
/// A stock item dropped below its reorder threshold.
pub const INVENTORY_LOW: &str = "inventory_low";
/// Unread-count update carried on the count channel.
pub const NOTIFICATIONS_UNREAD: &str = "notifications_unread";
/// Alias for [`NOTIFICATIONS_UNREAD`] used by older backends.
pub const COUNT_UPDATE: &str = "count_update";
/// Server heartbeat reply.
pub const PONG: &str = "pong";

/// Returns whether an event is channel plumbing rather than a domain event.
///
/// Covers the `*_connected` acks sent on channel open and the server's
/// `pong` heartbeat replies.
pub fn is_control(event: &str) -> bool {
    event == PONG || event.ends_with("_connected")
}
