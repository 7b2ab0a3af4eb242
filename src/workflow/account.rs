//! Account add/edit/delete workflow.

use core::mem;

use crate::client::BudgetClient;
use crate::models::{Account, AccountId, AccountRequest};
use crate::screens::AccountsScreen;

use super::{DeleteState, FormMode, FormState, ValidationError};

/// In-progress form state for an account.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccountDraft {
    /// Display name.
    pub name: String,
    /// Initial balance; `None` until the user enters one.
    pub initial_balance: Option<f64>,
}

impl AccountDraft {
    /// Copies the mutable fields of an existing account.
    fn from_account(account: &Account) -> Self {
        Self {
            name: account.name.clone(),
            initial_balance: Some(account.initial_balance),
        }
    }

    /// Checks the draft and builds the request to submit.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule's message.
    pub fn validate(&self) -> Result<AccountRequest, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError("Account name is required"));
        }
        let Some(initial_balance) = self.initial_balance.filter(|value| *value >= 0.0) else {
            return Err(ValidationError("Initial balance must be 0 or more"));
        };
        Ok(AccountRequest {
            name: name.to_owned(),
            initial_balance,
        })
    }
}

/// Workflow for the account add/edit form and delete confirmation.
#[derive(Debug, Default)]
pub struct AccountWorkflow {
    /// Add/edit dialog state.
    form: FormState<AccountDraft, AccountId>,
    /// Delete confirmation state.
    delete: DeleteState<Account>,
}

impl AccountWorkflow {
    /// Creates an idle workflow.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the form state.
    #[inline]
    #[must_use]
    pub const fn form(&self) -> &FormState<AccountDraft, AccountId> {
        &self.form
    }

    /// Returns the delete confirmation state.
    #[inline]
    #[must_use]
    pub const fn delete(&self) -> &DeleteState<Account> {
        &self.delete
    }

    /// Returns the editable draft while the form is open.
    #[inline]
    #[must_use]
    pub const fn draft_mut(&mut self) -> Option<&mut AccountDraft> {
        self.form.draft_mut()
    }

    /// Opens the add form with an empty draft, replacing any open form.
    #[inline]
    pub fn open_add(&mut self) {
        self.form = FormState::Open {
            mode: FormMode::Add,
            draft: AccountDraft::default(),
            error: None,
        };
    }

    /// Opens the edit form with a copy of the account's mutable fields.
    #[inline]
    pub fn open_edit(&mut self, account: &Account) {
        self.form = FormState::Open {
            mode: FormMode::Edit(account.id),
            draft: AccountDraft::from_account(account),
            error: None,
        };
    }

    /// Closes the form without saving.
    #[inline]
    pub fn close_form(&mut self) {
        self.form = FormState::Idle;
    }

    /// Validates the draft and submits it.
    ///
    /// On validation failure the form stays open with the message and no
    /// request is issued. On success the owning screen is reloaded and
    /// the form returns to idle; on server failure the form reopens with
    /// a save message and the untouched draft.
    pub async fn submit(&mut self, client: &BudgetClient, screen: &AccountsScreen) {
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
            FormMode::Add => client.create_account(&request).await.map(|_| ()),
            FormMode::Edit(id) => client.update_account(id, &request).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                screen.reload(client).await;
                self.form = FormState::Idle;
            }
            Err(err) => {
                tracing::warn!(error = %err, "account save failed");
                let message = match mode {
                    FormMode::Add => "Failed to create account",
                    FormMode::Edit(_) => "Failed to update account",
                };
                self.form = FormState::Open {
                    mode,
                    draft,
                    error: Some(message.to_owned()),
                };
            }
        }
    }

    /// Opens the delete confirmation for the given account.
    #[inline]
    pub fn open_delete(&mut self, account: Account) {
        self.delete = DeleteState::Confirming {
            target: account,
            error: None,
        };
    }

    /// Closes the delete confirmation without deleting.
    #[inline]
    pub fn cancel_delete(&mut self) {
        self.delete = DeleteState::Idle;
    }

    /// Issues the delete call for the confirmed account.
    ///
    /// On success the owning screen is reloaded; on failure the
    /// confirmation stays open with a message and nothing is removed.
    pub async fn confirm_delete(&mut self, client: &BudgetClient, screen: &AccountsScreen) {
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
        match client.delete_account(target.id).await {
            Ok(()) => {
                screen.reload(client).await;
                self.delete = DeleteState::Idle;
            }
            Err(err) => {
                tracing::warn!(error = %err, "account delete failed");
                self.delete = DeleteState::Confirming {
                    target,
                    error: Some("Failed to delete account".to_owned()),
                };
            }
        }
    }
}
