//! Per-account income rollups.

use crate::models::{Account, AccountId, Income};

/// One account with the incomes paid into it and their sum.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountIncomes {
    /// Account the rollup belongs to.
    pub account_id: AccountId,
    /// Account display name.
    pub account_name: String,
    /// Incomes paid into the account, in server order.
    pub incomes: Vec<Income>,
    /// Summed income amount.
    pub total: f64,
}

/// Returns the incomes paid into the given account, in server order.
#[inline]
#[must_use]
pub fn for_account(incomes: &[Income], account_id: AccountId) -> Vec<Income> {
    incomes
        .iter()
        .filter(|income| income.account_id == account_id)
        .cloned()
        .collect()
}

/// Sums the income amounts paid into the given account.
#[inline]
#[must_use]
pub fn total_for_account(incomes: &[Income], account_id: AccountId) -> f64 {
    incomes
        .iter()
        .filter(|income| income.account_id == account_id)
        .map(|income| income.amount)
        .sum()
}

/// Builds one rollup per account, zero-filled for accounts without
/// incomes. Incomes referencing an unknown account are left out — the
/// account list is authoritative for what the screen shows.
#[must_use]
pub fn rollups(accounts: &[Account], incomes: &[Income]) -> Vec<AccountIncomes> {
    accounts
        .iter()
        .map(|account| {
            let own: Vec<Income> = for_account(incomes, account.id);
            let total = own.iter().map(|income| income.amount).sum();
            AccountIncomes {
                account_id: account.id,
                account_name: account.name.clone(),
                incomes: own,
                total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::models::IncomeId;

    use super::*;

    /// Account fixture.
    fn account(id: i64) -> Account {
        Account {
            id: AccountId::new(id),
            name: format!("acc-{id}"),
            initial_balance: 0.0,
            current_balance: 0.0,
        }
    }

    /// Income fixture paid into the given account.
    fn income(id: i64, account_id: i64, amount: f64) -> Income {
        Income {
            id: IncomeId::new(id),
            amount,
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            created_at: NaiveDateTime::default(),
            account_id: AccountId::new(account_id),
            account_name: None,
            category_id: None,
            category_name: None,
            category_color: None,
        }
    }

    #[test]
    fn filters_by_account_id_equality() {
        let incomes = [income(1, 1, 100.0), income(2, 2, 40.0), income(3, 1, 60.0)];
        let own = for_account(&incomes, AccountId::new(1));
        assert_eq!(own.len(), 2);
        assert!((total_for_account(&incomes, AccountId::new(1)) - 160.0).abs() < f64::EPSILON);
        assert!((total_for_account(&incomes, AccountId::new(3))).abs() < f64::EPSILON);
    }

    #[test]
    fn rollups_cover_every_account() {
        let accounts = [account(1), account(2)];
        let incomes = [income(1, 1, 100.0)];
        let result = rollups(&accounts, &incomes);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].incomes.len(), 1);
        assert!((result[0].total - 100.0).abs() < f64::EPSILON);
        assert!(result[1].incomes.is_empty());
        assert!(result[1].total.abs() < f64::EPSILON);
    }

    #[test]
    fn incomes_for_unknown_accounts_are_ignored() {
        let accounts = [account(1)];
        let incomes = [income(1, 9, 77.0)];
        let result = rollups(&accounts, &incomes);
        assert_eq!(result.len(), 1);
        assert!(result[0].incomes.is_empty());
    }
}
