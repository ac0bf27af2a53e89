//! Strongly-typed integer ID wrappers for all entity types
//!
//! Records coming from the data services carry plain integer ids; wrapping
//! them keeps a category id from being passed where a budget id belongs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> u64 {
                self.0
            }

            /// The id following this one (ids are assigned as max + 1)
            pub const fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(CategoryId, "cat-");
define_id!(BudgetId, "bud-");
define_id!(GoalId, "goal-");

/// Next free id for a collection: one past the current maximum, or 1
pub fn next_id<I, T>(existing: I) -> T
where
    I: IntoIterator<Item = T>,
    T: Ord + Copy + From<u64> + Into<u64>,
{
    existing
        .into_iter()
        .max()
        .map(|max| T::from(max.into() + 1))
        .unwrap_or_else(|| T::from(1))
}

macro_rules! impl_into_u64 {
    ($($name:ident),*) => {
        $(impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        })*
    };
}

impl_into_u64!(TransactionId, CategoryId, BudgetId, GoalId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let id = CategoryId::new(8);
        assert_eq!(id.to_string(), "cat-8");
        assert_eq!("cat-8".parse::<CategoryId>().unwrap(), id);
        assert_eq!("8".parse::<CategoryId>().unwrap(), id);
        assert!("cat-x".parse::<CategoryId>().is_err());
    }

    #[test]
    fn test_next_id() {
        let ids = vec![BudgetId::new(1), BudgetId::new(4), BudgetId::new(2)];
        assert_eq!(next_id(ids), BudgetId::new(5));
        assert_eq!(next_id(Vec::<BudgetId>::new()), BudgetId::new(1));
    }

    #[test]
    fn test_serialization_is_plain_integer() {
        let id = TransactionId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    }
}
