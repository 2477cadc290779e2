//! Alert composition from raw domain event payloads.

use serde_json::Value;

use savora_core::events;

/// A composed, human-readable alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertContent {
    /// Alert title.
    pub title: String,
    /// Alert body text.
    pub body: String,
}

/// Map a filtered event and its payload to alert content.
///
/// Unknown event names produce no alert. Payloads are free-form and often
/// partial; every field access falls back through a chain of historical
/// key spellings and coerces to a string, so composition never fails.
pub fn compose(event_name: &str, payload: &Value) -> Option<AlertContent> {
    let event = event_name.to_ascii_lowercase();

    let content = match event.as_str() {
        events::KOT_CREATED | events::KOT => AlertContent {
            title: "New kitchen ticket".to_string(),
            body: join_parts(&[
                labeled("Table", &field(payload, &["table_name", "table"])),
                labeled("Order", &field(payload, &["order_number", "order_no"])),
            ])
            .unwrap_or_else(|| "A new ticket arrived".to_string()),
        },
        events::KOT_UPDATED => AlertContent {
            title: "Kitchen ticket updated".to_string(),
            body: join_parts(&[
                labeled("Table", &field(payload, &["table_name", "table"])),
                nonempty(&field(payload, &["status", "new_status"])),
            ])
            .unwrap_or_else(|| "A ticket was updated".to_string()),
        },
        events::KOT_DELETED | events::KOT_REJECTED => AlertContent {
            title: "Kitchen ticket rejected".to_string(),
            body: join_parts(&[
                labeled("Table", &field(payload, &["table_name", "table"])),
                nonempty(&field(payload, &["reason", "message"])),
            ])
            .unwrap_or_else(|| "A ticket was rejected".to_string()),
        },
        events::ORDER_CREATED => AlertContent {
            title: "New order".to_string(),
            body: join_parts(&[
                labeled("Table", &field(payload, &["table_name", "table"])),
                labeled("Order", &field(payload, &["order_number", "order_no"])),
            ])
            .unwrap_or_else(|| "A new order arrived".to_string()),
        },
        events::ORDER_STATUS_CHANGED => AlertContent {
            title: "Order update".to_string(),
            body: join_parts(&[
                labeled("Order", &field(payload, &["order_number", "order_no"])),
                nonempty(&field(payload, &["status", "new_status"])),
            ])
            .unwrap_or_else(|| "An order changed status".to_string()),
        },
        events::INVENTORY_LOW => AlertContent {
            title: "Low stock".to_string(),
            body: {
                let item = field(payload, &["item_name", "item", "name"]);
                if item.is_empty() {
                    "A stock item is running low".to_string()
                } else {
                    format!("{item} is running low")
                }
            },
        },
        _ => return None,
    };

    Some(content)
}

/// First present field in the chain, coerced to a string; `""` otherwise.
fn field(payload: &Value, keys: &[&str]) -> String {
    for key in keys {
        match payload.get(key) {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    String::new()
}

fn labeled(label: &str, value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(format!("{label} {value}"))
    }
}

fn nonempty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn join_parts(parts: &[Option<String>]) -> Option<String> {
    let present: Vec<&str> = parts.iter().flatten().map(String::as_str).collect();
    if present.is_empty() {
        None
    } else {
        Some(present.join(" · "))
    }
}
