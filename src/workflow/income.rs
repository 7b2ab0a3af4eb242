//! Income add/edit/delete workflow.

use core::mem;

use chrono::NaiveDate;

use crate::client::BudgetClient;
use crate::models::{Account, AccountId, Category, CategoryId, Income, IncomeId, IncomeRequest};
use crate::screens::IncomesScreen;

use super::{DeleteState, FormMode, FormState, ValidationError};

/// In-progress form state for an income.
///
/// Unlike the expense form, the category selection may stay empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncomeDraft {
    /// Amount; `None` until the user enters one.
    pub amount: Option<f64>,
    /// Free-form description.
    pub description: String,
    /// Day the income was received.
    pub date: Option<NaiveDate>,
    /// Selected account.
    pub account_id: Option<AccountId>,
    /// Selected category, if any.
    pub category_id: Option<CategoryId>,
}

impl IncomeDraft {
    /// Fresh draft dated today, preselecting the first available
    /// account and category.
    fn for_add(today: NaiveDate, accounts: &[Account], categories: &[Category]) -> Self {
        Self {
            amount: None,
            description: String::new(),
            date: Some(today),
            account_id: accounts.first().map(|account| account.id),
            category_id: categories.first().map(|category| category.id),
        }
    }

    /// Copies the mutable fields of an existing income.
    fn from_income(income: &Income) -> Self {
        Self {
            amount: Some(income.amount),
            description: income.description.clone().unwrap_or_default(),
            date: Some(income.date),
            account_id: Some(income.account_id),
            category_id: income.category_id,
        }
    }

    /// Checks the draft and builds the request to submit.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule's message.
    pub fn validate(&self) -> Result<IncomeRequest, ValidationError> {
        let Some(amount) = self.amount.filter(|value| *value > 0.0) else {
            return Err(ValidationError("Amount must be greater than 0"));
        };
        let Some(date) = self.date else {
            return Err(ValidationError("Date is required"));
        };
        let Some(account_id) = self.account_id else {
            return Err(ValidationError("Please select an account"));
        };

        let description = self.description.trim();
        Ok(IncomeRequest {
            amount,
            description: (!description.is_empty()).then(|| description.to_owned()),
            date,
            account_id,
            category_id: self.category_id,
        })
    }
}

/// Workflow for the income add/edit form and delete confirmation.
#[derive(Debug, Default)]
pub struct IncomeWorkflow {
    /// Add/edit dialog state.
    form: FormState<IncomeDraft, IncomeId>,
    /// Delete confirmation state.
    delete: DeleteState<Income>,
}

impl IncomeWorkflow {
    /// Creates an idle workflow.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the form state.
    #[inline]
    #[must_use]
    pub const fn form(&self) -> &FormState<IncomeDraft, IncomeId> {
        &self.form
    }

    /// Returns the delete confirmation state.
    #[inline]
    #[must_use]
    pub const fn delete(&self) -> &DeleteState<Income> {
        &self.delete
    }

    /// Returns the editable draft while the form is open.
    #[inline]
    #[must_use]
    pub const fn draft_mut(&mut self) -> Option<&mut IncomeDraft> {
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
            draft: IncomeDraft::for_add(today, accounts, categories),
            error: None,
        };
    }

    /// Opens the edit form with a copy of the income's mutable fields.
    #[inline]
    pub fn open_edit(&mut self, income: &Income) {
        self.form = FormState::Open {
            mode: FormMode::Edit(income.id),
            draft: IncomeDraft::from_income(income),
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
    pub async fn submit(&mut self, client: &BudgetClient, screen: &IncomesScreen) {
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
            FormMode::Add => client.create_income(&request).await.map(|_| ()),
            FormMode::Edit(id) => client.update_income(id, &request).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                screen.reload(client).await;
                self.form = FormState::Idle;
            }
            Err(err) => {
                tracing::warn!(error = %err, "income save failed");
                let message = match mode {
                    FormMode::Add => "Failed to create income",
                    FormMode::Edit(_) => "Failed to update income",
                };
                self.form = FormState::Open {
                    mode,
                    draft,
                    error: Some(message.to_owned()),
                };
            }
        }
    }

    /// Opens the delete confirmation for the given income.
    #[inline]
    pub fn open_delete(&mut self, income: Income) {
        self.delete = DeleteState::Confirming {
            target: income,
            error: None,
        };
    }

    /// Closes the delete confirmation without deleting.
    #[inline]
    pub fn cancel_delete(&mut self) {
        self.delete = DeleteState::Idle;
    }

    /// Issues the delete call for the confirmed income.
    pub async fn confirm_delete(&mut self, client: &BudgetClient, screen: &IncomesScreen) {
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
        match client.delete_income(target.id).await {
            Ok(()) => {
                screen.reload(client).await;
                self.delete = DeleteState::Idle;
            }
            Err(err) => {
                tracing::warn!(error = %err, "income delete failed");
                self.delete = DeleteState::Confirming {
                    target,
                    error: Some("Failed to delete income".to_owned()),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shorthand date constructor.
    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn category_is_optional() {
        let draft = IncomeDraft {
            amount: Some(100.0),
            description: String::new(),
            date: Some(date(2024, 3, 1)),
            account_id: Some(AccountId::new(1)),
            category_id: None,
        };
        let request = draft.validate().unwrap();
        assert!(request.category_id.is_none());
    }

    #[test]
    fn account_is_still_required() {
        let draft = IncomeDraft {
            amount: Some(100.0),
            date: Some(date(2024, 3, 1)),
            ..IncomeDraft::default()
        };
        assert_eq!(draft.validate().unwrap_err().0, "Please select an account");
    }

    #[test]
    fn description_is_trimmed_and_dropped_when_blank() {
        let mut draft = IncomeDraft {
            amount: Some(100.0),
            description: "  Salary  ".to_owned(),
            date: Some(date(2024, 3, 1)),
            account_id: Some(AccountId::new(1)),
            category_id: None,
        };
        assert_eq!(draft.validate().unwrap().description.as_deref(), Some("Salary"));
        draft.description = "   ".to_owned();
        assert!(draft.validate().unwrap().description.is_none());
    }

    #[test]
    fn edit_draft_copies_the_income() {
        let income = Income {
            id: IncomeId::new(21),
            amount: 3200.0,
            description: Some("Salary".to_owned()),
            date: date(2024, 3, 1),
            created_at: chrono::NaiveDateTime::default(),
            account_id: AccountId::new(1),
            account_name: None,
            category_id: Some(CategoryId::new(7)),
            category_name: None,
            category_color: None,
        };
        let mut workflow = IncomeWorkflow::new();
        workflow.open_edit(&income);
        let draft = workflow.form().draft().unwrap();
        assert_eq!(draft.amount, Some(3200.0));
        assert_eq!(draft.category_id, Some(CategoryId::new(7)));
        assert_eq!(draft.description, "Salary");
    }
}
