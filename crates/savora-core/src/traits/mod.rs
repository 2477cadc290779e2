//! Core traits defined in `savora-core` and implemented by other crates.

pub mod notifier;

pub use notifier::{NativeAlert, Notifier, PermissionState};
