//! Composable filter for the expense list.
//!
//! Mirrors the filter bar of the expenses screen: category, inclusive
//! date range, and a returns-only toggle. All set criteria are combined
//! — an expense must satisfy every one to pass.

use chrono::NaiveDate;

use crate::models::{CategoryId, Expense};

/// Composable filter over an expense collection.
///
/// # Examples
///
/// ```
/// use monthlybudget_rs::models::{CategoryId, NaiveDate};
/// use monthlybudget_rs::views::filter::ExpenseFilter;
///
/// let filter = ExpenseFilter::new()
///     .category(CategoryId::new(3))
///     .date_range(
///         NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
///     );
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Category the expense must belong to.
    pub category: Option<CategoryId>,
    /// Start date (inclusive).
    pub date_from: Option<NaiveDate>,
    /// End date (inclusive).
    pub date_to: Option<NaiveDate>,
    /// Keep only returns.
    pub returns_only: bool,
}

/// Expense/return totals over a filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilteredTotals {
    /// Sum of non-return amounts that passed the filter.
    pub expenses: f64,
    /// Sum of return amounts that passed the filter.
    pub returns: f64,
    /// `expenses - returns`.
    pub net: f64,
}

impl ExpenseFilter {
    /// Creates an empty filter that matches all expenses.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to expenses in the given category.
    #[inline]
    #[must_use]
    pub const fn category(mut self, id: CategoryId) -> Self {
        self.category = Some(id);
        self
    }

    /// Restricts to expenses dated within the given range (inclusive).
    #[inline]
    #[must_use]
    pub const fn date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    /// Keeps only returns.
    #[inline]
    #[must_use]
    pub const fn returns_only(mut self) -> Self {
        self.returns_only = true;
        self
    }

    /// Returns `true` when no criterion is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && !self.returns_only
    }

    /// Returns `true` if the expense satisfies all set criteria.
    #[inline]
    #[must_use]
    pub fn matches(&self, expense: &Expense) -> bool {
        self.matches_category(expense) && self.matches_date(expense) && self.matches_kind(expense)
    }

    /// Checks the category criterion.
    fn matches_category(&self, expense: &Expense) -> bool {
        self.category.is_none_or(|id| expense.category_id == id)
    }

    /// Checks the date range criteria.
    fn matches_date(&self, expense: &Expense) -> bool {
        self.date_from.is_none_or(|from| expense.date >= from)
            && self.date_to.is_none_or(|to| expense.date <= to)
    }

    /// Checks the returns-only criterion.
    const fn matches_kind(&self, expense: &Expense) -> bool {
        !self.returns_only || expense.is_return
    }
}

/// Returns the expenses that pass the filter, in server order.
#[inline]
#[must_use]
pub fn apply(expenses: &[Expense], filter: &ExpenseFilter) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| filter.matches(expense))
        .cloned()
        .collect()
}

/// Sums the filtered expenses, split by return flag.
#[must_use]
pub fn totals(expenses: &[Expense], filter: &ExpenseFilter) -> FilteredTotals {
    let mut result = FilteredTotals::default();
    for expense in expenses.iter().filter(|expense| filter.matches(expense)) {
        if expense.is_return {
            result.returns += expense.amount;
        } else {
            result.expenses += expense.amount;
        }
    }
    result.net = result.expenses - result.returns;
    result
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use crate::models::{AccountId, ExpenseId};

    use super::*;

    /// Expense fixture.
    fn expense(id: i64, amount: f64, is_return: bool, category: i64, date: &str) -> Expense {
        Expense {
            id: ExpenseId::new(id),
            amount,
            description: None,
            date: date.parse().unwrap(),
            is_return,
            created_at: NaiveDateTime::default(),
            account_id: AccountId::new(1),
            account_name: None,
            category_id: CategoryId::new(category),
            category_name: None,
            category_color: None,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let items = [
            expense(1, 10.0, false, 1, "2024-03-01"),
            expense(2, 5.0, true, 2, "2024-03-02"),
        ];
        let filter = ExpenseFilter::new();
        assert!(filter.is_empty());
        assert_eq!(apply(&items, &filter).len(), 2);
    }

    #[test]
    fn criteria_combine_conjunctively() {
        let items = [
            expense(1, 10.0, false, 1, "2024-03-01"),
            expense(2, 5.0, true, 1, "2024-03-02"),
            expense(3, 7.0, true, 2, "2024-03-02"),
            expense(4, 9.0, true, 1, "2024-05-01"),
        ];
        let filter = ExpenseFilter::new()
            .category(CategoryId::new(1))
            .date_range(
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            )
            .returns_only();

        let kept = apply(&items, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, ExpenseId::new(2));
    }

    #[test]
    fn date_range_is_inclusive() {
        let items = [
            expense(1, 1.0, false, 1, "2024-03-01"),
            expense(2, 1.0, false, 1, "2024-03-31"),
            expense(3, 1.0, false, 1, "2024-04-01"),
        ];
        let filter = ExpenseFilter::new().date_range(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        assert_eq!(apply(&items, &filter).len(), 2);
    }

    #[test]
    fn totals_split_by_return_flag() {
        let items = [
            expense(1, 100.0, false, 1, "2024-03-01"),
            expense(2, 30.0, true, 1, "2024-03-02"),
            expense(3, 50.0, false, 2, "2024-03-03"),
        ];
        let filter = ExpenseFilter::new().category(CategoryId::new(1));
        let result = totals(&items, &filter);
        assert!((result.expenses - 100.0).abs() < f64::EPSILON);
        assert!((result.returns - 30.0).abs() < f64::EPSILON);
        assert!((result.net - 70.0).abs() < f64::EPSILON);
    }
}
