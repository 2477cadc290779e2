//! Staff domain entities.

pub mod role;

pub use role::StaffRole;
