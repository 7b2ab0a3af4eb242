//! Expense model.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{AccountId, CategoryId, ExpenseId};

/// A recorded expense.
///
/// `is_return` flips the sign semantics: a return reduces net spend
/// instead of increasing it. Account and category names/colors are
/// denormalized by the server for display; they may be absent when the
/// referenced category no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier assigned by the server.
    pub id: ExpenseId,
    /// Positive amount in the account currency.
    pub amount: f64,
    /// Free-form description.
    pub description: Option<String>,
    /// Day the expense occurred.
    pub date: NaiveDate,
    /// Whether this entry is a return (refund) rather than a spend.
    #[serde(default)]
    pub is_return: bool,
    /// Server-side creation timestamp.
    pub created_at: NaiveDateTime,
    /// Account the expense was paid from.
    pub account_id: AccountId,
    /// Denormalized account name.
    pub account_name: Option<String>,
    /// Category the expense belongs to.
    pub category_id: CategoryId,
    /// Denormalized category name.
    pub category_name: Option<String>,
    /// Denormalized category color.
    pub category_color: Option<String>,
}

/// Request body for creating or updating an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRequest {
    /// Positive amount in the account currency.
    pub amount: f64,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Day the expense occurred.
    pub date: NaiveDate,
    /// Whether this entry is a return (refund).
    pub is_return: bool,
    /// Account the expense is paid from.
    pub account_id: AccountId,
    /// Category the expense belongs to.
    pub category_id: CategoryId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_expense() {
        let json = r##"{
            "id": 11,
            "amount": 120.0,
            "description": "Weekly shop",
            "date": "2024-03-05",
            "isReturn": false,
            "createdAt": "2024-03-05T18:30:00",
            "accountId": 1,
            "accountName": "Main Account",
            "categoryId": 3,
            "categoryName": "Groceries",
            "categoryColor": "#81B29A"
        }"##;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.id, ExpenseId::new(11));
        assert!(!expense.is_return);
        assert_eq!(
            expense.date,
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
        assert_eq!(expense.category_name.as_deref(), Some("Groceries"));
    }

    #[test]
    fn deserialize_return_with_missing_category_display_fields() {
        let json = r#"{
            "id": 12,
            "amount": 20.0,
            "description": null,
            "date": "2024-03-10",
            "isReturn": true,
            "createdAt": "2024-03-10T09:00:00",
            "accountId": 1,
            "accountName": "Main Account",
            "categoryId": 3,
            "categoryName": null,
            "categoryColor": null
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert!(expense.is_return);
        assert!(expense.category_name.is_none());
        assert!(expense.category_color.is_none());
    }

    #[test]
    fn serialize_request_wire_shape() {
        let request = ExpenseRequest {
            amount: 45.5,
            description: Some("Fuel".to_owned()),
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            is_return: false,
            account_id: AccountId::new(1),
            category_id: CategoryId::new(5),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""isReturn":false"#));
        assert!(json.contains(r#""date":"2024-04-01""#));
        assert!(json.contains(r#""accountId":1"#));
        assert!(json.contains(r#""categoryId":5"#));
    }
}
