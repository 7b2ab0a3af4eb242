//! Monthly expense aggregation: single-month totals and the six-month
//! bar series.

use chrono::{Datelike, NaiveDate};

use crate::models::Expense;

/// Number of months covered by [`six_month_series`].
const SERIES_MONTHS: u32 = 6;

/// Spend/return totals for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthTotals {
    /// Sum of non-return amounts.
    pub expenses: f64,
    /// Sum of return amounts.
    pub returns: f64,
    /// `expenses - returns`.
    pub net: f64,
}

/// One bar-chart point: a calendar month with both series values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthBucket {
    /// Calendar year of the bucket.
    pub year: i32,
    /// Calendar month of the bucket (1-12).
    pub month: u32,
    /// Sum of non-return amounts dated in this month.
    pub spent: f64,
    /// Sum of return amounts dated in this month.
    pub returns: f64,
}

/// Sums expenses dated in the given `(year, month)`, split by return flag.
#[must_use]
pub fn totals_for_month(expenses: &[Expense], year: i32, month: u32) -> MonthTotals {
    let mut totals = MonthTotals::default();
    for expense in expenses {
        if expense.date.year() == year && expense.date.month() == month {
            if expense.is_return {
                totals.returns += expense.amount;
            } else {
                totals.expenses += expense.amount;
            }
        }
    }
    totals.net = totals.expenses - totals.returns;
    totals
}

/// Sums expenses dated in `today`'s calendar month.
///
/// `today` is the caller's notion of the current local date; views stay
/// clock-free so they remain pure.
#[inline]
#[must_use]
pub fn current_month_totals(expenses: &[Expense], today: NaiveDate) -> MonthTotals {
    totals_for_month(expenses, today.year(), today.month())
}

/// Buckets all expenses over the six calendar months ending at `today`'s
/// month, oldest first, zero-filling months with no activity.
///
/// Expenses dated outside the window are excluded entirely, so the sum
/// over all buckets of `spent + returns` equals the amount sum of the
/// in-window expenses.
#[must_use]
pub fn six_month_series(expenses: &[Expense], today: NaiveDate) -> Vec<MonthBucket> {
    (0..SERIES_MONTHS)
        .rev()
        .map(|back| {
            let (year, month) = months_back(today.year(), today.month(), back);
            let totals = totals_for_month(expenses, year, month);
            MonthBucket {
                year,
                month,
                spent: totals.expenses,
                returns: totals.returns,
            }
        })
        .collect()
}

/// Steps `back` calendar months backwards from `(year, month)`.
const fn months_back(mut year: i32, mut month: u32, back: u32) -> (i32, u32) {
    let mut remaining = back;
    while remaining > 0 {
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
        remaining -= 1;
    }
    (year, month)
}
