//! Per-screen store sets and their reload orchestration.
//!
//! Each feature screen owns the stores it renders from plus a
//! [`Loader`] that numbers its reload rounds. `reload` fans all fetches
//! out concurrently and presents one loading flag and one screen-level
//! error to the caller: the primary resource's failure produces the
//! screen message, secondary failures stay on their own store so the
//! screen still renders with whatever loaded.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::client::BudgetClient;
use crate::loader::{Loader, Role, run_fetch};
use crate::models::{Account, Category, Expense, Goal, Income};
use crate::store::ResourceStore;

/// Locks a screen-level error slot. Poisoning is tolerated the same
/// way as in [`ResourceStore`].
fn error_slot(slot: &Mutex<Option<String>>) -> MutexGuard<'_, Option<String>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Generates a screen struct with one primary and N secondary stores.
macro_rules! define_screen {
    (
        name: $name:ident,
        doc: $doc:expr,
        primary: { $pfield:ident: $pentity:ty, fetch: $pfetch:ident, label: $plabel:literal },
        $( secondary: { $sfield:ident: $sentity:ty, fetch: $sfetch:ident, label: $slabel:literal }, )+
    ) => {
        #[doc = $doc]
        #[derive(Debug, Default)]
        pub struct $name {
            #[doc = concat!("Store for the ", $plabel, " collection (primary resource).")]
            pub $pfield: ResourceStore<$pentity>,
            $(
                #[doc = concat!("Store for the ", $slabel, " collection (secondary resource).")]
                pub $sfield: ResourceStore<$sentity>,
            )+
            /// Round allocator for reloads.
            loader: Loader,
            /// Screen-level error from the newest settled round.
            error: Mutex<Option<String>>,
        }

        impl $name {
            /// Creates the screen with empty stores.
            #[inline]
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Reloads every store of this screen as one concurrent round.
            ///
            /// Calling again while a previous round is in flight is
            /// allowed; the newest round supersedes the older one and all
            /// of the older round's late responses are discarded.
            #[tracing::instrument(skip_all)]
            pub async fn reload(&self, client: &BudgetClient) {
                let round = self.loader.next_round();
                tracing::debug!(round, "starting reload round");
                *error_slot(&self.error) = None;
                self.$pfield.begin_load(round);
                $( self.$sfield.begin_load(round); )+

                let ($pfield, $($sfield),+) = futures::join!(
                    run_fetch(&self.$pfield, round, Role::Primary, $plabel, client.$pfetch()),
                    $( run_fetch(&self.$sfield, round, Role::Secondary, $slabel, client.$sfetch()), )+
                );
                let message = $pfield $( .or($sfield) )+;

                if self.loader.is_current(round) {
                    *error_slot(&self.error) = message;
                }
            }

            /// Returns `true` while any of this screen's fetches is in
            /// flight; clears only once the whole round has completed.
            #[inline]
            #[must_use]
            pub fn is_loading(&self) -> bool {
                self.$pfield.is_loading() $( || self.$sfield.is_loading() )+
            }

            /// Returns the screen-level error from the newest settled
            /// round, if its primary fetch failed.
            #[inline]
            #[must_use]
            pub fn error(&self) -> Option<String> {
                error_slot(&self.error).clone()
            }
        }
    };
}

define_screen! {
    name: AccountsScreen,
    doc: "Stores backing the accounts screen: the account list plus the\nincomes and categories used for per-account rollups.",
    primary: { accounts: Account, fetch: accounts, label: "accounts" },
    secondary: { incomes: Income, fetch: incomes, label: "incomes" },
    secondary: { categories: Category, fetch: categories, label: "categories" },
}

define_screen! {
    name: ExpensesScreen,
    doc: "Stores backing the expenses screen: the expense list plus the\naccounts and categories referenced by the expense form.",
    primary: { expenses: Expense, fetch: expenses, label: "expenses" },
    secondary: { accounts: Account, fetch: accounts, label: "accounts" },
    secondary: { categories: Category, fetch: categories, label: "categories" },
}

define_screen! {
    name: IncomesScreen,
    doc: "Stores backing the incomes screen: the income list plus the\naccounts and categories referenced by the income form.",
    primary: { incomes: Income, fetch: incomes, label: "incomes" },
    secondary: { accounts: Account, fetch: accounts, label: "accounts" },
    secondary: { categories: Category, fetch: categories, label: "categories" },
}

define_screen! {
    name: GoalsScreen,
    doc: "Stores backing the goals screen: the goal list plus the\ncategories referenced by the goal form.",
    primary: { goals: Goal, fetch: goals, label: "goals" },
    secondary: { categories: Category, fetch: categories, label: "categories" },
}

/// Stores backing the categories screen. Categories are the only
/// resource here, so the screen is written out without the macro.
#[derive(Debug, Default)]
pub struct CategoriesScreen {
    /// Store for the categories collection (primary resource).
    pub categories: ResourceStore<Category>,
    /// Round allocator for reloads.
    loader: Loader,
    /// Screen-level error from the newest settled round.
    error: Mutex<Option<String>>,
}

impl CategoriesScreen {
    /// Creates the screen with an empty store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reloads the category store as one round.
    #[tracing::instrument(skip_all)]
    pub async fn reload(&self, client: &BudgetClient) {
        let round = self.loader.next_round();
        tracing::debug!(round, "starting reload round");
        *error_slot(&self.error) = None;
        self.categories.begin_load(round);

        let message = run_fetch(
            &self.categories,
            round,
            Role::Primary,
            "categories",
            client.categories(),
        )
        .await;

        if self.loader.is_current(round) {
            *error_slot(&self.error) = message;
        }
    }

    /// Returns `true` while the category fetch is in flight.
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.categories.is_loading()
    }

    /// Returns the screen-level error from the newest settled round.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<String> {
        error_slot(&self.error).clone()
    }
}
