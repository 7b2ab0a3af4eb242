//! Goal add/edit/delete workflow plus the fund sub-workflow.

use core::mem;

use chrono::NaiveDate;

use crate::client::BudgetClient;
use crate::models::{CategoryId, Goal, GoalId, GoalRequest};
use crate::screens::GoalsScreen;

use super::{DeleteState, FormMode, FormState, ValidationError};

/// In-progress form state for a goal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GoalDraft {
    /// Display name.
    pub name: String,
    /// Target amount; `None` until the user enters one.
    pub target_amount: Option<f64>,
    /// Deadline, if any.
    pub deadline: Option<NaiveDate>,
    /// Category, if any.
    pub category_id: Option<CategoryId>,
}

impl GoalDraft {
    /// Copies the mutable fields of an existing goal.
    fn from_goal(goal: &Goal) -> Self {
        Self {
            name: goal.name.clone(),
            target_amount: Some(goal.target_amount),
            deadline: goal.deadline,
            category_id: goal.category_id,
        }
    }

    /// Checks the draft and builds the request to submit.
    ///
    /// The saved amount is never part of a regular save; only the fund
    /// sub-workflow touches it.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule's message.
    pub fn validate(&self) -> Result<GoalRequest, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError("Goal name is required"));
        }
        let Some(target_amount) = self.target_amount.filter(|value| *value > 0.0) else {
            return Err(ValidationError("Target amount must be greater than 0"));
        };
        Ok(GoalRequest {
            name: name.to_owned(),
            target_amount,
            deadline: self.deadline,
            category_id: self.category_id,
            current_amount: None,
        })
    }
}

/// State of the fund (deposit) dialog.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FundState {
    /// No fund dialog open.
    #[default]
    Idle,
    /// Dialog open, waiting for an amount.
    Open {
        /// Goal being funded.
        goal: Goal,
        /// Amount to add; `None` until the user enters one.
        amount: Option<f64>,
        /// Inline message from validation or a failed deposit.
        error: Option<String>,
    },
    /// Deposit in flight.
    Submitting {
        /// Goal being funded.
        goal: Goal,
        /// Amount being added.
        amount: f64,
    },
}

impl FundState {
    /// Returns `true` when no fund dialog is open.
    #[inline]
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns the goal being funded, if any.
    #[inline]
    #[must_use]
    pub const fn goal(&self) -> Option<&Goal> {
        match self {
            Self::Open { goal, .. } | Self::Submitting { goal, .. } => Some(goal),
            Self::Idle => None,
        }
    }

    /// Returns the inline message, if any.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Open { error, .. } => error.as_deref(),
            Self::Submitting { .. } | Self::Idle => None,
        }
    }
}

/// Workflow for the goal form, delete confirmation, and fund dialog.
#[derive(Debug, Default)]
pub struct GoalWorkflow {
    /// Add/edit dialog state.
    form: FormState<GoalDraft, GoalId>,
    /// Delete confirmation state.
    delete: DeleteState<Goal>,
    /// Fund dialog state.
    fund: FundState,
}

impl GoalWorkflow {
    /// Creates an idle workflow.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the form state.
    #[inline]
    #[must_use]
    pub const fn form(&self) -> &FormState<GoalDraft, GoalId> {
        &self.form
    }

    /// Returns the delete confirmation state.
    #[inline]
    #[must_use]
    pub const fn delete(&self) -> &DeleteState<Goal> {
        &self.delete
    }

    /// Returns the fund dialog state.
    #[inline]
    #[must_use]
    pub const fn fund(&self) -> &FundState {
        &self.fund
    }

    /// Returns the editable draft while the form is open.
    #[inline]
    #[must_use]
    pub const fn draft_mut(&mut self) -> Option<&mut GoalDraft> {
        self.form.draft_mut()
    }

    /// Opens the add form with an empty draft.
    #[inline]
    pub fn open_add(&mut self) {
        self.form = FormState::Open {
            mode: FormMode::Add,
            draft: GoalDraft::default(),
            error: None,
        };
    }

    /// Opens the edit form with a copy of the goal's mutable fields.
    #[inline]
    pub fn open_edit(&mut self, goal: &Goal) {
        self.form = FormState::Open {
            mode: FormMode::Edit(goal.id),
            draft: GoalDraft::from_goal(goal),
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
    pub async fn submit(&mut self, client: &BudgetClient, screen: &GoalsScreen) {
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
            FormMode::Add => client.create_goal(&request).await.map(|_| ()),
            FormMode::Edit(id) => client.update_goal(id, &request).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                screen.reload(client).await;
                self.form = FormState::Idle;
            }
            Err(err) => {
                tracing::warn!(error = %err, "goal save failed");
                let message = match mode {
                    FormMode::Add => "Failed to create goal",
                    FormMode::Edit(_) => "Failed to update goal",
                };
                self.form = FormState::Open {
                    mode,
                    draft,
                    error: Some(message.to_owned()),
                };
            }
        }
    }

    /// Opens the fund dialog for the given goal, replacing any open one.
    #[inline]
    pub fn open_fund(&mut self, goal: Goal) {
        self.fund = FundState::Open {
            goal,
            amount: None,
            error: None,
        };
    }

    /// Sets the amount in the open fund dialog.
    #[inline]
    pub fn set_fund_amount(&mut self, value: Option<f64>) {
        if let FundState::Open { amount, .. } = &mut self.fund {
            *amount = value;
        }
    }

    /// Closes the fund dialog without depositing.
    #[inline]
    pub fn cancel_fund(&mut self) {
        self.fund = FundState::Idle;
    }

    /// Validates the amount and deposits it into the goal.
    ///
    /// The deposit is expressed as a full update: the goal's existing
    /// name, target, deadline, and category are sent back unchanged with
    /// `current_amount` raised by the entered amount. On success the
    /// owning screen is reloaded; on failure the dialog stays open with
    /// a message and the goal is untouched.
    pub async fn submit_fund(&mut self, client: &BudgetClient, screen: &GoalsScreen) {
        let (goal, amount) = match mem::take(&mut self.fund) {
            FundState::Open { goal, amount, .. } => (goal, amount),
            other => {
                self.fund = other;
                return;
            }
        };

        let Some(value) = amount.filter(|value| *value > 0.0) else {
            self.fund = FundState::Open {
                goal,
                amount,
                error: Some("Amount must be greater than 0".to_owned()),
            };
            return;
        };

        let request = GoalRequest {
            name: goal.name.clone(),
            target_amount: goal.target_amount,
            deadline: goal.deadline,
            category_id: goal.category_id,
            current_amount: Some(goal.current_amount + value),
        };

        self.fund = FundState::Submitting {
            goal: goal.clone(),
            amount: value,
        };
        match client.update_goal(goal.id, &request).await {
            Ok(_) => {
                screen.reload(client).await;
                self.fund = FundState::Idle;
            }
            Err(err) => {
                tracing::warn!(error = %err, "goal deposit failed");
                self.fund = FundState::Open {
                    goal,
                    amount: Some(value),
                    error: Some("Failed to add funds".to_owned()),
                };
            }
        }
    }

    /// Opens the delete confirmation for the given goal.
    #[inline]
    pub fn open_delete(&mut self, goal: Goal) {
        self.delete = DeleteState::Confirming {
            target: goal,
            error: None,
        };
    }

    /// Closes the delete confirmation without deleting.
    #[inline]
    pub fn cancel_delete(&mut self) {
        self.delete = DeleteState::Idle;
    }

    /// Issues the delete call for the confirmed goal.
    pub async fn confirm_delete(&mut self, client: &BudgetClient, screen: &GoalsScreen) {
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
        match client.delete_goal(target.id).await {
            Ok(()) => {
                screen.reload(client).await;
                self.delete = DeleteState::Idle;
            }
            Err(err) => {
                tracing::warn!(error = %err, "goal delete failed");
                self.delete = DeleteState::Confirming {
                    target,
                    error: Some("Failed to delete goal".to_owned()),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    /// Goal fixture with some funds already saved.
    fn goal(id: i64, current: f64) -> Goal {
        Goal {
            id: GoalId::new(id),
            name: "Vacation".to_owned(),
            target_amount: 1000.0,
            current_amount: current,
            deadline: NaiveDate::from_ymd_opt(2024, 9, 1),
            category_id: Some(CategoryId::new(8)),
            category_name: Some("Travel".to_owned()),
            progress_percentage: current / 10.0,
        }
    }

    /// Builds a client pointed at the given mock server.
    fn test_client(server: &MockServer) -> BudgetClient {
        BudgetClient::builder()
            .token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap()
    }

    #[test]
    fn validate_requires_name_then_positive_target() {
        let mut draft = GoalDraft::default();
        assert_eq!(draft.validate().unwrap_err().0, "Goal name is required");
        draft.name = "Vacation".to_owned();
        assert_eq!(
            draft.validate().unwrap_err().0,
            "Target amount must be greater than 0"
        );
        draft.target_amount = Some(1000.0);
        let request = draft.validate().unwrap();
        assert!(request.current_amount.is_none());
    }

    #[tokio::test]
    async fn fund_composes_a_full_update_with_the_raised_amount() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/goals/5"))
            .and(body_json(json!({
                "name": "Vacation",
                "targetAmount": 1000.0,
                "deadline": "2024-09-01",
                "categoryId": 8,
                "currentAmount": 350.0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5, "name": "Vacation", "targetAmount": 1000.0,
                "currentAmount": 350.0, "deadline": "2024-09-01",
                "categoryId": 8, "categoryName": "Travel",
                "progressPercentage": 35.0
            })))
            .expect(1)
            .mount(&server)
            .await;
        for route in ["/goals", "/categories"] {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
                .mount(&server)
                .await;
        }

        let mut workflow = GoalWorkflow::new();
        workflow.open_fund(goal(5, 250.0));
        workflow.set_fund_amount(Some(100.0));

        let screen = GoalsScreen::new();
        workflow.submit_fund(&test_client(&server), &screen).await;
        assert!(workflow.fund().is_idle());
    }

    #[tokio::test]
    async fn fund_rejects_a_non_positive_amount_without_a_request() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/goals/5"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut workflow = GoalWorkflow::new();
        workflow.open_fund(goal(5, 250.0));
        workflow.set_fund_amount(Some(0.0));

        let screen = GoalsScreen::new();
        workflow.submit_fund(&test_client(&server), &screen).await;

        assert_eq!(workflow.fund().error(), Some("Amount must be greater than 0"));
        assert!(workflow.fund().goal().is_some());
    }

    #[tokio::test]
    async fn failed_fund_keeps_the_dialog_open() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/goals/5"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut workflow = GoalWorkflow::new();
        workflow.open_fund(goal(5, 250.0));
        workflow.set_fund_amount(Some(100.0));

        let screen = GoalsScreen::new();
        workflow.submit_fund(&test_client(&server), &screen).await;

        assert_eq!(workflow.fund().error(), Some("Failed to add funds"));
        // The entered amount survives for another attempt.
        assert!(matches!(
            workflow.fund(),
            FundState::Open {
                amount: Some(amount),
                ..
            } if (amount - 100.0).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn open_fund_replaces_a_previous_fund_dialog() {
        let mut workflow = GoalWorkflow::new();
        workflow.open_fund(goal(5, 250.0));
        workflow.set_fund_amount(Some(40.0));
        workflow.open_fund(goal(6, 0.0));
        assert!(matches!(
            workflow.fund(),
            FundState::Open { amount: None, .. }
        ));
    }
}
