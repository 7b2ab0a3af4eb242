//! Pure derived views over resource stores.
//!
//! Everything here is a deterministic function of its inputs: no store
//! is ever mutated, and recomputing with identical inputs yields
//! identical results. Callers that want recompute-on-change semantics
//! key a [`Derived`] cache on the input stores' versions.

pub mod balance;
pub mod categories;
pub mod filter;
pub mod goals;
pub mod incomes;
pub mod monthly;

mod derived;

pub use derived::Derived;
