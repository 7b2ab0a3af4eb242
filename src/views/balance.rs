//! Balance totals across accounts.

use crate::models::Account;

/// Summed balances over all loaded accounts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BalanceTotals {
    /// Sum of every account's current balance.
    pub total: f64,
    /// Sum of every account's initial balance.
    pub initial: f64,
    /// `total - initial`: how much the accounts moved since opening.
    pub diff: f64,
}

/// Sums current and initial balances over the given accounts.
#[inline]
#[must_use]
pub fn totals(accounts: &[Account]) -> BalanceTotals {
    let total = accounts.iter().map(|account| account.current_balance).sum();
    let initial = accounts.iter().map(|account| account.initial_balance).sum();
    BalanceTotals {
        total,
        initial,
        diff: total - initial,
    }
}
