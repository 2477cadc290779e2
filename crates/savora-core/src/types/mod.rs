//! Core type definitions used across the Savora workspace.

pub mod id;

pub use id::*;
