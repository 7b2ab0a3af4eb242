//! Data models for Monthly Budget API entities.
//!
//! This module contains strongly-typed representations of the five
//! entity families served by the API, their mutation-request shapes,
//! and newtype ID wrappers.

mod account;
mod category;
mod expense;
mod goal;
mod ids;
mod income;

pub use account::{Account, AccountRequest};
pub use category::{Category, CategoryRequest, FALLBACK_COLOR, FALLBACK_ICON};
pub use expense::{Expense, ExpenseRequest};
pub use goal::{Goal, GoalRequest};
pub use ids::{AccountId, CategoryId, ExpenseId, GoalId, IncomeId};
pub use income::{Income, IncomeRequest};

pub use chrono::{NaiveDate, NaiveDateTime};
