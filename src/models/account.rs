//! Financial account model.

use serde::{Deserialize, Serialize};

use super::AccountId;

/// A user's account (wallet, bank account, savings pot).
///
/// `current_balance` is derived by the server from the initial balance and
/// all recorded expenses/incomes; the client never recomputes it beyond
/// display aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier assigned by the server.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Balance the account was opened with.
    pub initial_balance: f64,
    /// Server-derived balance after all recorded activity.
    pub current_balance: f64,
}

/// Request body for creating or updating an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRequest {
    /// Display name.
    pub name: String,
    /// Balance the account was opened with (must be >= 0).
    pub initial_balance: f64,
}
