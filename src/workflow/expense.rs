//! Expense add/edit/delete workflow.

use core::mem;

use chrono::NaiveDate;

use crate::client::BudgetClient;
use crate::models::{Account, AccountId, Category, CategoryId, Expense, ExpenseId, ExpenseRequest};
use crate::screens::ExpensesScreen;

use super::{DeleteState, FormMode, FormState, ValidationError};

/// In-progress form state for an expense.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseDraft {
    /// Amount; `None` until the user enters one.
    pub amount: Option<f64>,
    /// Free-form description.
    pub description: String,
    /// Day the expense occurred.
    pub date: Option<NaiveDate>,
    /// Whether the entry is a return.
    pub is_return: bool,
    /// Selected account.
    pub account_id: Option<AccountId>,
    /// Selected category.
    pub category_id: Option<CategoryId>,
}

impl ExpenseDraft {
    /// Fresh draft dated today, preselecting the first available
    /// account and category.
    fn for_add(today: NaiveDate, accounts: &[Account], categories: &[Category]) -> Self {
        Self {
            amount: None,
            description: String::new(),
            date: Some(today),
            is_return: false,
            account_id: accounts.first().map(|account| account.id),
            category_id: categories.first().map(|category| category.id),
        }
    }

    /// Copies the mutable fields of an existing expense.
    fn from_expense(expense: &Expense) -> Self {
        Self {
            amount: Some(expense.amount),
            description: expense.description.clone().unwrap_or_default(),
            date: Some(expense.date),
            is_return: expense.is_return,
            account_id: Some(expense.account_id),
            category_id: Some(expense.category_id),
        }
    }

    /// Checks the draft and builds the request to submit.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule's message.
    pub fn validate(&self) -> Result<ExpenseRequest, ValidationError> {
        let Some(amount) = self.amount.filter(|value| *value > 0.0) else {
            return Err(ValidationError("Amount must be greater than 0"));
        };
        let Some(date) = self.date else {
            return Err(ValidationError("Date is required"));
        };
        let Some(account_id) = self.account_id else {
            return Err(ValidationError("Please select an account"));
        };
        let Some(category_id) = self.category_id else {
            return Err(ValidationError("Please select a category"));
        };

        let description = self.description.trim();
        Ok(ExpenseRequest {
            amount,
            description: (!description.is_empty()).then(|| description.to_owned()),
            date,
            is_return: self.is_return,
            account_id,
            category_id,
        })
    }
}

/// Workflow for the expense add/edit form and delete confirmation.
#[derive(Debug, Default)]
pub struct ExpenseWorkflow {
    /// Add/edit dialog state.
    form: FormState<ExpenseDraft, ExpenseId>,
    /// Delete confirmation state.
    delete: DeleteState<Expense>,
}

impl ExpenseWorkflow {
    /// Creates an idle workflow.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the form state.
    #[inline]
    #[must_use]
    pub const fn form(&self) -> &FormState<ExpenseDraft, ExpenseId> {
        &self.form
    }

    /// Returns the delete confirmation state.
    #[inline]
    #[must_use]
    pub const fn delete(&self) -> &DeleteState<Expense> {
        &self.delete
    }

    /// Returns the editable draft while the form is open.
    #[inline]
    #[must_use]
    pub const fn draft_mut(&mut self) -> Option<&mut ExpenseDraft> {
        self.form.draft_mut()
    }

    /// Opens the add form with a draft dated `today`, preselecting the
    /// first available account and category from the screen's stores.
    #[inline]
    pub fn open_add(
        &mut self,
        today: NaiveDate,
        accounts: &[Account],
        categories: &[Category],
    ) {
        self.form = FormState::Open {
            mode: FormMode::Add,
            draft: ExpenseDraft::for_add(today, accounts, categories),
            error: None,
        };
    }

    /// Opens the edit form with a copy of the expense's mutable fields.
    #[inline]
    pub fn open_edit(&mut self, expense: &Expense) {
        self.form = FormState::Open {
            mode: FormMode::Edit(expense.id),
            draft: ExpenseDraft::from_expense(expense),
            error: None,
        };
    }

    /// Closes the form without saving.
    #[inline]
    pub fn close_form(&mut self) {
        self.form = FormState::Idle;
    }

    /// Validates the draft and submits it (see
    /// [`AccountWorkflow::submit`](super::AccountWorkflow::submit) for
    /// the shared protocol).
    pub async fn submit(&mut self, client: &BudgetClient, screen: &ExpensesScreen) {
        let (mode, draft) = match mem::take(&mut self.form) {
            FormState::Open { mode, draft, .. } => (mode, draft),
            other => {
                self.form = other;
                return;
            }
        };

        let request = match draft.validate() {
            Ok(request) => request,
            Err(err) => {
                self.form = FormState::Open {
                    mode,
                    draft,
                    error: Some(err.to_string()),
                };
                return;
            }
        };

        self.form = FormState::Submitting {
            mode,
            draft: draft.clone(),
        };
        let result = match mode {
            FormMode::Add => client.create_expense(&request).await.map(|_| ()),
            FormMode::Edit(id) => client.update_expense(id, &request).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                screen.reload(client).await;
                self.form = FormState::Idle;
            }
            Err(err) => {
                tracing::warn!(error = %err, "expense save failed");
                let message = match mode {
                    FormMode::Add => "Failed to create expense",
                    FormMode::Edit(_) => "Failed to update expense",
                };
                self.form = FormState::Open {
                    mode,
                    draft,
                    error: Some(message.to_owned()),
                };
            }
        }
    }

    /// Opens the delete confirmation for the given expense.
    #[inline]
    pub fn open_delete(&mut self, expense: Expense) {
        self.delete = DeleteState::Confirming {
            target: expense,
            error: None,
        };
    }

    /// Closes the delete confirmation without deleting.
    #[inline]
    pub fn cancel_delete(&mut self) {
        self.delete = DeleteState::Idle;
    }

    /// Issues the delete call for the confirmed expense.
    pub async fn confirm_delete(&mut self, client: &BudgetClient, screen: &ExpensesScreen) {
        let target = match mem::take(&mut self.delete) {
            DeleteState::Confirming { target, .. } => target,
            other => {
                self.delete = other;
                return;
            }
        };

        self.delete = DeleteState::Deleting {
            target: target.clone(),
        };
        match client.delete_expense(target.id).await {
            Ok(()) => {
                screen.reload(client).await;
                self.delete = DeleteState::Idle;
            }
            Err(err) => {
                tracing::warn!(error = %err, "expense delete failed");
                self.delete = DeleteState::Confirming {
                    target,
                    error: Some("Failed to delete expense".to_owned()),
                };
            }
        }
    }
}
