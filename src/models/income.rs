//! Income model.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{AccountId, CategoryId, IncomeId};

/// A recorded income. Always increases the account balance.
///
/// Unlike expenses, the category link is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    /// Unique identifier assigned by the server.
    pub id: IncomeId,
    /// Positive amount in the account currency.
    pub amount: f64,
    /// Free-form description.
    pub description: Option<String>,
    /// Day the income was received.
    pub date: NaiveDate,
    /// Server-side creation timestamp.
    pub created_at: NaiveDateTime,
    /// Account the income was paid into.
    pub account_id: AccountId,
    /// Denormalized account name.
    pub account_name: Option<String>,
    /// Category the income belongs to, if any.
    pub category_id: Option<CategoryId>,
    /// Denormalized category name.
    pub category_name: Option<String>,
    /// Denormalized category color.
    pub category_color: Option<String>,
}

/// Request body for creating or updating an income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRequest {
    /// Positive amount in the account currency.
    pub amount: f64,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Day the income was received.
    pub date: NaiveDate,
    /// Account the income is paid into.
    pub account_id: AccountId,
    /// Category the income belongs to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}
