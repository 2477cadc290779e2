//! Role-aware event noise filter.
//!
//! This is a UX filter, not a security control: it only decides what
//! interrupts the user, never what is persisted or listed.

use std::collections::HashSet;

use savora_core::events;
use savora_entity::StaffRole;

/// Decide whether a raw domain event should become a visible alert.
///
/// Case-insensitive on `event_name`. The generic `order` event is always
/// suppressed (it is redundant with the finer-grained `kot_*`/`order_*`
/// events); general updates always pass; an empty role set fails open so
/// an unassigned account never silently loses alerts. KOT creations only
/// interrupt prep stations and admins; KOT rejections skip the stations
/// that caused them.
pub fn should_alert(event_name: &str, roles: &HashSet<StaffRole>) -> bool {
    let event = event_name.to_ascii_lowercase();

    if event == events::ORDER {
        return false;
    }

    let is_creation = matches!(event.as_str(), "kot_created" | "kot");
    let is_rejection = matches!(event.as_str(), "kot_deleted" | "kot_rejected");

    if !is_creation && !is_rejection {
        return true;
    }

    if roles.is_empty() {
        return true;
    }

    if is_creation {
        return roles.iter().any(|r| r.is_station() || r.is_admin());
    }

    // Rejection: shown to any role outside the stations.
    roles.iter().any(|r| !r.is_station())
}
