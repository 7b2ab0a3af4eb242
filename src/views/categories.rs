//! Category pie-chart series over non-return expenses.

use crate::models::{Expense, FALLBACK_COLOR};

/// Label used for expenses whose category display name is missing.
pub const OTHER_LABEL: &str = "Other";

/// One pie slice: a category label with its summed spend and color.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    /// Category display name, or [`OTHER_LABEL`].
    pub label: String,
    /// Display color of the slice.
    pub color: String,
    /// Summed non-return amount for the label.
    pub total: f64,
}

/// Groups non-return expenses by category name into pie slices.
///
/// Slices appear in first-seen order. Each slice takes its color from
/// the first expense that opened the group, falling back to the neutral
/// gray when that expense carries no category color. Returns are
/// excluded — the pie shows where money went, not where it came back.
#[must_use]
pub fn breakdown(expenses: &[Expense]) -> Vec<CategorySlice> {
    let mut slices: Vec<CategorySlice> = Vec::new();
    for expense in expenses {
        if expense.is_return {
            continue;
        }
        let label = expense
            .category_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(OTHER_LABEL);

        match slices.iter().position(|slice| slice.label == label) {
            Some(index) => {
                if let Some(slice) = slices.get_mut(index) {
                    slice.total += expense.amount;
                }
            }
            None => {
                let color = expense
                    .category_color
                    .as_deref()
                    .filter(|color| !color.is_empty())
                    .unwrap_or(FALLBACK_COLOR);
                slices.push(CategorySlice {
                    label: label.to_owned(),
                    color: color.to_owned(),
                    total: expense.amount,
                });
            }
        }
    }
    slices
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::models::{AccountId, CategoryId, ExpenseId};

    use super::*;

    /// Expense fixture with the given category display fields.
    fn expense(
        id: i64,
        amount: f64,
        is_return: bool,
        category_name: Option<&str>,
        category_color: Option<&str>,
    ) -> Expense {
        Expense {
            id: ExpenseId::new(id),
            amount,
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            is_return,
            created_at: NaiveDateTime::default(),
            account_id: AccountId::new(1),
            account_name: Some("Main".to_owned()),
            category_id: CategoryId::new(1),
            category_name: category_name.map(str::to_owned),
            category_color: category_color.map(str::to_owned),
        }
    }

    #[test]
    fn groups_by_label_in_first_seen_order() {
        let expenses = [
            expense(1, 30.0, false, Some("Food"), Some("#E07A5F")),
            expense(2, 15.0, false, Some("Transport"), Some("#5B9BD5")),
            expense(3, 20.0, false, Some("Food"), Some("#FFFFFF")),
        ];
        let slices = breakdown(&expenses);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "Food");
        assert!((slices[0].total - 50.0).abs() < f64::EPSILON);
        // The first observed color wins for the group.
        assert_eq!(slices[0].color, "#E07A5F");
        assert_eq!(slices[1].label, "Transport");
    }

    #[test]
    fn returns_are_excluded() {
        let expenses = [
            expense(1, 30.0, false, Some("Food"), None),
            expense(2, 10.0, true, Some("Food"), None),
        ];
        let slices = breakdown(&expenses);
        assert_eq!(slices.len(), 1);
        assert!((slices[0].total - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_category_falls_back_to_other_and_gray() {
        let expenses = [
            expense(1, 12.0, false, None, None),
            expense(2, 8.0, false, Some(""), Some("")),
        ];
        let slices = breakdown(&expenses);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].label, OTHER_LABEL);
        assert_eq!(slices[0].color, FALLBACK_COLOR);
        assert!((slices[0].total - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_yields_no_slices() {
        assert!(breakdown(&[]).is_empty());
    }
}
