//! # savora-api
//!
//! REST client for the Savora back-office API. Exposes the
//! [`NotificationsGateway`] seam trait the sync client consumes and the
//! [`BackofficeClient`] implementation that speaks the API's
//! `{status, data}` envelope over `reqwest`.

pub mod client;
pub mod gateway;
pub mod types;

pub use client::BackofficeClient;
pub use gateway::{NotificationPage, NotificationsGateway};
