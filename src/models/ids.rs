//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time. IDs are positive integers handed out
//! sequentially by the storage layer, starting at 1.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the underlying integer
            pub const fn value(&self) -> u64 {
                self.0
            }

            /// The ID following this one in allocation order
            pub const fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            /// Accepts both `12` and the prefixed form `spend-12`
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(MonthId, "month-");
define_id!(DayId, "day-");
define_id!(IncomeId, "income-");
define_id!(MonthlyPaymentId, "payment-");
define_id!(SpendId, "spend-");
define_id!(SpendTypeId, "type-");

impl SpendTypeId {
    /// Reserved value meaning "no spend type"
    pub const NONE: SpendTypeId = SpendTypeId(0);

    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(SpendId::new(42).to_string(), "42");
    }

    #[test]
    fn test_id_parse() {
        assert_eq!("7".parse::<MonthId>().unwrap(), MonthId::new(7));
        assert_eq!("spend-12".parse::<SpendId>().unwrap(), SpendId::new(12));
        assert_eq!(" type-3 ".parse::<SpendTypeId>().unwrap(), SpendTypeId::new(3));
        assert!("spend-x".parse::<SpendId>().is_err());
        assert!("-1".parse::<DayId>().is_err());
    }

    #[test]
    fn test_id_serialization() {
        let id = IncomeId::new(5);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "5");
        let deserialized: IncomeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_next_and_ordering() {
        let first = MonthlyPaymentId::default().next();
        assert_eq!(first, MonthlyPaymentId::new(1));
        assert!(first < first.next());
    }

    #[test]
    fn test_reserved_spend_type() {
        assert!(SpendTypeId::NONE.is_none());
        assert!(SpendTypeId::default().is_none());
        assert!(!SpendTypeId::new(1).is_none());
    }
}
