//! Newtype wrappers for entity identifiers.
//!
//! These prevent accidentally mixing up IDs of different entity types
//! at compile time. All server-assigned IDs are 64-bit integers.

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapping an `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier from the given value.
            #[inline]
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Consumes the wrapper and returns the inner value.
            #[inline]
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

define_id! {
    /// Unique identifier for an account.
    AccountId
}

define_id! {
    /// Unique identifier for a category.
    CategoryId
}

define_id! {
    /// Unique identifier for an expense.
    ExpenseId
}

define_id! {
    /// Unique identifier for an income.
    IncomeId
}

define_id! {
    /// Unique identifier for a savings goal.
    GoalId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_serde_transparent() {
        let id = AccountId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn id_display_and_conversions() {
        let id = GoalId::from(7);
        assert_eq!(id.to_string(), "7");
        assert_eq!(id.into_inner(), 7);
    }

    #[test]
    fn ids_are_distinct_types() {
        fn takes_category(_: CategoryId) {}
        takes_category(CategoryId::new(1));
        // AccountId would not compile here; the wrappers are not interchangeable.
    }
}
