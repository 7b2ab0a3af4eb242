//! Category add/edit/delete workflow.

use core::mem;

use crate::client::BudgetClient;
use crate::models::{Category, CategoryId, CategoryRequest};
use crate::screens::CategoriesScreen;

use super::{DeleteState, FormMode, FormState, ValidationError};

/// Icon preselected in a fresh add form.
const NEW_CATEGORY_ICON: &str = "🛒";

/// Color preselected in a fresh add form (first preset).
const NEW_CATEGORY_COLOR: &str = "#E07A5F";

/// In-progress form state for a category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryDraft {
    /// Display name.
    pub name: String,
    /// Emoji-style icon label.
    pub icon: String,
    /// Hex display color.
    pub color: String,
    /// Whether the category is marked as a default.
    pub is_default: bool,
}

impl CategoryDraft {
    /// Fresh draft with the preset icon and color.
    fn for_add() -> Self {
        Self {
            name: String::new(),
            icon: NEW_CATEGORY_ICON.to_owned(),
            color: NEW_CATEGORY_COLOR.to_owned(),
            is_default: false,
        }
    }

    /// Copies the mutable fields of an existing category, substituting
    /// the presets where it has none.
    fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            icon: category
                .icon
                .clone()
                .unwrap_or_else(|| NEW_CATEGORY_ICON.to_owned()),
            color: category
                .color
                .clone()
                .unwrap_or_else(|| NEW_CATEGORY_COLOR.to_owned()),
            is_default: category.is_default,
        }
    }

    /// Checks the draft and builds the request to submit.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule's message.
    pub fn validate(&self) -> Result<CategoryRequest, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError("Category name is required"));
        }
        Ok(CategoryRequest {
            name: name.to_owned(),
            icon: some_if_filled(&self.icon),
            color: some_if_filled(&self.color),
            is_default: Some(self.is_default),
        })
    }
}

/// `Some(trimmed)` for non-blank input, `None` otherwise.
fn some_if_filled(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Workflow for the category add/edit form and delete confirmation.
#[derive(Debug, Default)]
pub struct CategoryWorkflow {
    /// Add/edit dialog state.
    form: FormState<CategoryDraft, CategoryId>,
    /// Delete confirmation state.
    delete: DeleteState<Category>,
}

impl CategoryWorkflow {
    /// Creates an idle workflow.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the form state.
    #[inline]
    #[must_use]
    pub const fn form(&self) -> &FormState<CategoryDraft, CategoryId> {
        &self.form
    }

    /// Returns the delete confirmation state.
    #[inline]
    #[must_use]
    pub const fn delete(&self) -> &DeleteState<Category> {
        &self.delete
    }

    /// Returns the editable draft while the form is open.
    #[inline]
    #[must_use]
    pub const fn draft_mut(&mut self) -> Option<&mut CategoryDraft> {
        self.form.draft_mut()
    }

    /// Opens the add form with the preset icon and color.
    #[inline]
    pub fn open_add(&mut self) {
        self.form = FormState::Open {
            mode: FormMode::Add,
            draft: CategoryDraft::for_add(),
            error: None,
        };
    }

    /// Opens the edit form with a copy of the category's mutable fields.
    #[inline]
    pub fn open_edit(&mut self, category: &Category) {
        self.form = FormState::Open {
            mode: FormMode::Edit(category.id),
            draft: CategoryDraft::from_category(category),
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
    pub async fn submit(&mut self, client: &BudgetClient, screen: &CategoriesScreen) {
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
            FormMode::Add => client.create_category(&request).await.map(|_| ()),
            FormMode::Edit(id) => client.update_category(id, &request).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                screen.reload(client).await;
                self.form = FormState::Idle;
            }
            Err(err) => {
                tracing::warn!(error = %err, "category save failed");
                let message = match mode {
                    FormMode::Add => "Failed to create category",
                    FormMode::Edit(_) => "Failed to update category",
                };
                self.form = FormState::Open {
                    mode,
                    draft,
                    error: Some(message.to_owned()),
                };
            }
        }
    }

    /// Opens the delete confirmation for the given category.
    #[inline]
    pub fn open_delete(&mut self, category: Category) {
        self.delete = DeleteState::Confirming {
            target: category,
            error: None,
        };
    }

    /// Closes the delete confirmation without deleting.
    #[inline]
    pub fn cancel_delete(&mut self) {
        self.delete = DeleteState::Idle;
    }

    /// Issues the delete call for the confirmed category.
    pub async fn confirm_delete(&mut self, client: &BudgetClient, screen: &CategoriesScreen) {
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
        match client.delete_category(target.id).await {
            Ok(()) => {
                screen.reload(client).await;
                self.delete = DeleteState::Idle;
            }
            Err(err) => {
                tracing::warn!(error = %err, "category delete failed");
                self.delete = DeleteState::Confirming {
                    target,
                    error: Some("Failed to delete category".to_owned()),
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

    #[test]
    fn add_draft_carries_presets() {
        let mut workflow = CategoryWorkflow::new();
        workflow.open_add();
        let draft = workflow.form().draft().unwrap();
        assert_eq!(draft.icon, NEW_CATEGORY_ICON);
        assert_eq!(draft.color, NEW_CATEGORY_COLOR);
        assert!(!draft.is_default);
    }

    #[test]
    fn validate_requires_a_name() {
        let draft = CategoryDraft::for_add();
        assert_eq!(draft.validate().unwrap_err().0, "Category name is required");
    }

    #[test]
    fn blank_icon_and_color_are_omitted_from_the_request() {
        let draft = CategoryDraft {
            name: "Pets".to_owned(),
            icon: "  ".to_owned(),
            color: String::new(),
            is_default: true,
        };
        let request = draft.validate().unwrap();
        assert!(request.icon.is_none());
        assert!(request.color.is_none());
        assert_eq!(request.is_default, Some(true));
    }

    #[tokio::test]
    async fn submit_add_posts_and_reloads() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/categories"))
            .and(body_json(json!({
                "name": "Pets",
                "icon": "🐾",
                "color": "#81B29A",
                "isDefault": false
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!(
                {"id": 7, "name": "Pets", "icon": "🐾", "color": "#81B29A", "isDefault": false}
            )))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 7, "name": "Pets", "icon": "🐾", "color": "#81B29A", "isDefault": false}
            ])))
            .mount(&server)
            .await;

        let client = BudgetClient::builder()
            .token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap();

        let mut workflow = CategoryWorkflow::new();
        workflow.open_add();
        if let Some(draft) = workflow.draft_mut() {
            draft.name = "Pets".to_owned();
            draft.icon = "🐾".to_owned();
            draft.color = "#81B29A".to_owned();
        }

        let screen = CategoriesScreen::new();
        workflow.submit(&client, &screen).await;

        assert!(workflow.form().is_idle());
        assert_eq!(screen.categories.len(), 1);
    }
}
