//! Staff role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Staff functions within a restaurant.
///
/// Roles are used client-side only for alert-noise filtering; they carry no
/// permission semantics here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    /// Restaurant administrator.
    Admin,
    /// Kitchen prep station.
    Kitchen,
    /// Bar prep station.
    Bar,
    /// Cafe prep station.
    Cafe,
    /// Front-of-house waiter.
    Waiter,
    /// Cashier / till operator.
    Cashier,
}

impl StaffRole {
    /// Check whether this role is a prep station (kitchen, bar, cafe).
    ///
    /// Stations originate KOT rejections and consume KOT creations.
    pub fn is_station(&self) -> bool {
        matches!(self, Self::Kitchen | Self::Bar | Self::Cafe)
    }

    /// Check whether this role is an administrator.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Kitchen => "kitchen",
            Self::Bar => "bar",
            Self::Cafe => "cafe",
            Self::Waiter => "waiter",
            Self::Cashier => "cashier",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StaffRole {
    type Err = savora_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "kitchen" => Ok(Self::Kitchen),
            "bar" => Ok(Self::Bar),
            "cafe" => Ok(Self::Cafe),
            "waiter" => Ok(Self::Waiter),
            "cashier" => Ok(Self::Cashier),
            _ => Err(savora_core::AppError::validation(format!(
                "Invalid staff role: '{s}'. Expected one of: admin, kitchen, bar, cafe, waiter, cashier"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_classification() {
        assert!(StaffRole::Kitchen.is_station());
        assert!(StaffRole::Bar.is_station());
        assert!(StaffRole::Cafe.is_station());
        assert!(!StaffRole::Admin.is_station());
        assert!(!StaffRole::Waiter.is_station());
        assert!(!StaffRole::Cashier.is_station());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("kitchen".parse::<StaffRole>().unwrap(), StaffRole::Kitchen);
        assert_eq!("WAITER".parse::<StaffRole>().unwrap(), StaffRole::Waiter);
        assert!("chef".parse::<StaffRole>().is_err());
    }
}
