//! Dialog workflow state machines.
//!
//! One workflow per entity family governs its add/edit form and its
//! delete confirmation as two small explicit state machines, instead of
//! a pile of per-dialog booleans that can drift into impossible
//! combinations. Opening a form while another is open replaces it, so a
//! workflow never has two dialogs up at once.
//!
//! Submitting follows the mutate-then-reload protocol: validation runs
//! locally first (no network call on failure), a successful mutation
//! triggers the owning screen's reload, and a failed mutation returns
//! to the open form with a message and no partial state. Collections
//! are never altered before the server confirms.

pub mod account;
pub mod category;
pub mod expense;
pub mod goal;
pub mod income;

pub use account::{AccountDraft, AccountWorkflow};
pub use category::{CategoryDraft, CategoryWorkflow};
pub use expense::{ExpenseDraft, ExpenseWorkflow};
pub use goal::{FundState, GoalDraft, GoalWorkflow};
pub use income::{IncomeDraft, IncomeWorkflow};

/// A rejected draft: the first violated rule's message.
///
/// Validation failures are form state, not system faults — they are
/// surfaced inline and never logged as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

/// Whether a form creates a new entity or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<Id> {
    /// Creating a new entity.
    Add,
    /// Editing the entity with the given ID.
    Edit(Id),
}

/// State of an add/edit dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState<D, Id> {
    /// No dialog open.
    Idle,
    /// Dialog open with an editable draft.
    Open {
        /// Add or edit.
        mode: FormMode<Id>,
        /// In-progress, unsaved form state.
        draft: D,
        /// Inline message from validation or a failed submit.
        error: Option<String>,
    },
    /// Submit in flight; the draft is no longer editable.
    Submitting {
        /// Add or edit.
        mode: FormMode<Id>,
        /// Draft being submitted.
        draft: D,
    },
}

impl<D, Id> Default for FormState<D, Id> {
    #[inline]
    fn default() -> Self {
        Self::Idle
    }
}

impl<D, Id> FormState<D, Id> {
    /// Returns `true` when no dialog is open.
    #[inline]
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns `true` while the dialog is open and editable.
    #[inline]
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Returns `true` while a submit is in flight.
    #[inline]
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    /// Returns the current draft, open or submitting.
    #[inline]
    #[must_use]
    pub const fn draft(&self) -> Option<&D> {
        match self {
            Self::Open { draft, .. } | Self::Submitting { draft, .. } => Some(draft),
            Self::Idle => None,
        }
    }

    /// Returns the editable draft while the dialog is open.
    #[inline]
    #[must_use]
    pub const fn draft_mut(&mut self) -> Option<&mut D> {
        match self {
            Self::Open { draft, .. } => Some(draft),
            Self::Submitting { .. } | Self::Idle => None,
        }
    }

    /// Returns the inline form message, if any.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Open { error, .. } => error.as_deref(),
            Self::Submitting { .. } | Self::Idle => None,
        }
    }
}

/// State of a delete confirmation dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteState<E> {
    /// No confirmation open.
    Idle,
    /// Waiting for the user to confirm.
    Confirming {
        /// Entity that would be deleted.
        target: E,
        /// Message from a previously failed delete attempt.
        error: Option<String>,
    },
    /// Delete request in flight.
    Deleting {
        /// Entity being deleted.
        target: E,
    },
}

impl<E> Default for DeleteState<E> {
    #[inline]
    fn default() -> Self {
        Self::Idle
    }
}

impl<E> DeleteState<E> {
    /// Returns `true` when no confirmation is open.
    #[inline]
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns the entity under confirmation or deletion.
    #[inline]
    #[must_use]
    pub const fn target(&self) -> Option<&E> {
        match self {
            Self::Confirming { target, .. } | Self::Deleting { target } => Some(target),
            Self::Idle => None,
        }
    }

    /// Returns the confirm-scoped message, if any.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Confirming { error, .. } => error.as_deref(),
            Self::Deleting { .. } | Self::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_state_accessors() {
        let mut state: FormState<String, i64> = FormState::default();
        assert!(state.is_idle());
        assert!(state.draft().is_none());

        state = FormState::Open {
            mode: FormMode::Add,
            draft: "draft".to_owned(),
            error: None,
        };
        assert!(state.is_open());
        assert_eq!(state.draft().map(String::as_str), Some("draft"));
        assert!(state.error().is_none());

        state = FormState::Submitting {
            mode: FormMode::Edit(7),
            draft: "draft".to_owned(),
        };
        assert!(state.is_submitting());
        // The draft is visible but no longer editable.
        assert!(state.draft().is_some());
        assert!(state.draft_mut().is_none());
    }

    #[test]
    fn delete_state_accessors() {
        let mut state: DeleteState<&str> = DeleteState::default();
        assert!(state.is_idle());

        state = DeleteState::Confirming {
            target: "entity",
            error: Some("Failed to delete".to_owned()),
        };
        assert_eq!(state.target(), Some(&"entity"));
        assert_eq!(state.error(), Some("Failed to delete"));
    }

    #[test]
    fn validation_error_displays_its_message() {
        let err = ValidationError("Amount must be greater than 0");
        assert_eq!(err.to_string(), "Amount must be greater than 0");
    }
}
