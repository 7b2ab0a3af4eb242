//! Async HTTP client for the Monthly Budget API.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::error::{BudgetError, Result};
use crate::models::{
    Account, AccountId, AccountRequest, Category, CategoryId, CategoryRequest, Expense, ExpenseId,
    ExpenseRequest, Goal, GoalId, GoalRequest, Income, IncomeId, IncomeRequest,
};

/// Base URL for a locally hosted Monthly Budget service.
const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Accounts resource path.
const ACCOUNTS_PATH: &str = "/accounts";

/// Categories resource path.
const CATEGORIES_PATH: &str = "/categories";

/// Expenses resource path.
const EXPENSES_PATH: &str = "/expenses";

/// Incomes resource path.
const INCOMES_PATH: &str = "/incomes";

/// Goals resource path.
const GOALS_PATH: &str = "/goals";

/// Generates the CRUD quintet for one resource family.
macro_rules! define_resource {
    (
        family: $family:literal,
        path: $path:expr,
        entity: $entity:ty,
        request: $request:ty,
        id: $id:ty,
        list: $list:ident,
        get: $get:ident,
        create: $create:ident,
        update: $update:ident,
        delete: $delete:ident,
    ) => {
        #[doc = concat!("Fetches all ", $family, " for the current user.")]
        ///
        /// # Errors
        ///
        /// Returns an error if the HTTP request fails, the server returns a
        /// non-success status, or the response cannot be deserialized.
        #[inline]
        #[tracing::instrument(skip_all)]
        pub async fn $list(&self) -> Result<Vec<$entity>> {
            self.get_json($path).await
        }

        #[doc = concat!("Fetches one of the user's ", $family, " by ID.")]
        ///
        /// # Errors
        ///
        /// Returns an error if the HTTP request fails, the server returns a
        /// non-success status, or the response cannot be deserialized.
        #[inline]
        #[tracing::instrument(skip_all, fields(id = %id))]
        pub async fn $get(&self, id: $id) -> Result<$entity> {
            self.get_json(&format!("{}/{id}", $path)).await
        }

        #[doc = concat!("Creates a new entry in the ", $family, " collection.")]
        ///
        /// Returns the created entity with its server-assigned ID.
        ///
        /// # Errors
        ///
        /// Returns an error if the HTTP request fails, the server returns a
        /// non-success status, or the response cannot be deserialized.
        #[inline]
        #[tracing::instrument(skip_all)]
        pub async fn $create(&self, request: &$request) -> Result<$entity> {
            self.post_json($path, request).await
        }

        #[doc = concat!("Updates an existing entry in the ", $family, " collection.")]
        ///
        /// Returns the updated entity as stored by the server.
        ///
        /// # Errors
        ///
        /// Returns an error if the HTTP request fails, the server returns a
        /// non-success status, or the response cannot be deserialized.
        #[inline]
        #[tracing::instrument(skip_all, fields(id = %id))]
        pub async fn $update(&self, id: $id, request: &$request) -> Result<$entity> {
            self.put_json(&format!("{}/{id}", $path), request).await
        }

        #[doc = concat!("Deletes an entry from the ", $family, " collection.")]
        ///
        /// # Errors
        ///
        /// Returns an error if the HTTP request fails or the server returns
        /// a non-success status.
        #[inline]
        #[tracing::instrument(skip_all, fields(id = %id))]
        pub async fn $delete(&self, id: $id) -> Result<()> {
            self.delete_path(&format!("{}/{id}", $path)).await
        }
    };
}

/// Builder for constructing a [`BudgetClient`].
#[derive(Debug)]
pub struct BudgetClientBuilder {
    /// Access token for API authentication.
    token: Option<String>,
    /// Base URL override (for testing).
    base_url: Option<String>,
}

impl BudgetClientBuilder {
    /// Sets the access token for API authentication.
    #[inline]
    #[must_use]
    pub fn token<T: Into<String>>(mut self, token: T) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Overrides the base URL (useful for testing with a mock server).
    #[inline]
    #[must_use]
    pub fn base_url<T: Into<String>>(mut self, url: T) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetError::MissingToken`] if no token was provided.
    /// Returns [`BudgetError::Http`] if the HTTP client fails to build.
    #[inline]
    #[tracing::instrument(skip_all)]
    pub fn build(self) -> Result<BudgetClient> {
        let token = self.token.ok_or(BudgetError::MissingToken)?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        tracing::debug!(base_url = %base_url, "building client");
        let http = reqwest::Client::builder().build()?;

        Ok(BudgetClient {
            http,
            token,
            base_url,
        })
    }
}

/// Async client for the Monthly Budget API.
///
/// Use [`BudgetClient::builder()`] to construct an instance. Every call
/// carries the configured bearer token; non-success responses are
/// converted to [`BudgetError::Api`] with the raw body as message.
#[derive(Debug)]
pub struct BudgetClient {
    /// Underlying HTTP client.
    http: reqwest::Client,
    /// Bearer access token.
    token: String,
    /// API base URL.
    base_url: String,
}

impl BudgetClient {
    /// Creates a new builder for configuring the client.
    #[inline]
    #[must_use]
    pub const fn builder() -> BudgetClientBuilder {
        BudgetClientBuilder {
            token: None,
            base_url: None,
        }
    }

    define_resource! {
        family: "accounts",
        path: ACCOUNTS_PATH,
        entity: Account,
        request: AccountRequest,
        id: AccountId,
        list: accounts,
        get: account,
        create: create_account,
        update: update_account,
        delete: delete_account,
    }

    define_resource! {
        family: "categories",
        path: CATEGORIES_PATH,
        entity: Category,
        request: CategoryRequest,
        id: CategoryId,
        list: categories,
        get: category,
        create: create_category,
        update: update_category,
        delete: delete_category,
    }

    define_resource! {
        family: "expenses",
        path: EXPENSES_PATH,
        entity: Expense,
        request: ExpenseRequest,
        id: ExpenseId,
        list: expenses,
        get: expense,
        create: create_expense,
        update: update_expense,
        delete: delete_expense,
    }

    define_resource! {
        family: "incomes",
        path: INCOMES_PATH,
        entity: Income,
        request: IncomeRequest,
        id: IncomeId,
        list: incomes,
        get: income,
        create: create_income,
        update: update_income,
        delete: delete_income,
    }

    define_resource! {
        family: "goals",
        path: GOALS_PATH,
        entity: Goal,
        request: GoalRequest,
        id: GoalId,
        list: goals,
        get: goal,
        create: create_goal,
        update: update_goal,
        delete: delete_goal,
    }

    /// Sends an authenticated GET request and deserializes the response.
    #[tracing::instrument(skip_all, fields(path = %path))]
    async fn get_json<Resp: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Resp> {
        let url = format!("{}{path}", self.base_url);
        tracing::trace!(url = %url, "sending GET request");
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Sends an authenticated JSON POST request and deserializes the response.
    #[tracing::instrument(skip_all, fields(path = %path))]
    async fn post_json<Req: serde::Serialize + Sync, Resp: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<Resp> {
        let url = format!("{}{path}", self.base_url);
        tracing::trace!(url = %url, "sending POST request");
        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Sends an authenticated JSON PUT request and deserializes the response.
    #[tracing::instrument(skip_all, fields(path = %path))]
    async fn put_json<Req: serde::Serialize + Sync, Resp: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<Resp> {
        let url = format!("{}{path}", self.base_url);
        tracing::trace!(url = %url, "sending PUT request");
        let response = self
            .http
            .put(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Sends an authenticated DELETE request, expecting an empty body.
    #[tracing::instrument(skip_all, fields(path = %path))]
    async fn delete_path(&self, path: &str) -> Result<()> {
        let url = format!("{}{path}", self.base_url);
        tracing::trace!(url = %url, "sending DELETE request");
        let response = self
            .http
            .delete(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "received response");
        if status.is_success() {
            Ok(())
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_owned());
            Err(BudgetError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Handles an HTTP response, checking status and deserializing the body.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        tracing::debug!(status = %status, "received response");
        if status.is_success() {
            let body = response.text().await?;
            tracing::trace!(body_len = body.len(), "parsing response body");
            serde_json::from_str(&body).map_err(BudgetError::from)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_owned());
            tracing::debug!(status = status.as_u16(), message = %message, "API error");
            Err(BudgetError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn builder_requires_token() {
        let result = BudgetClient::builder().build();
        assert!(matches!(result, Err(BudgetError::MissingToken)));
    }

    #[test]
    fn builder_with_token_succeeds() {
        let client = BudgetClient::builder().token("test-token").build().unwrap();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn builder_custom_base_url() {
        let client = BudgetClient::builder()
            .token("test-token")
            .base_url("http://localhost:9090/api")
            .build()
            .unwrap();
        assert_eq!(client.base_url, "http://localhost:9090/api");
    }

    /// Builds a client pointed at the given mock server.
    fn test_client(server: &MockServer) -> BudgetClient {
        BudgetClient::builder()
            .token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn list_accounts_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/accounts"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Main", "initialBalance": 100.0, "currentBalance": 80.0}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let accounts = client.accounts().await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name, "Main");
    }

    #[tokio::test]
    async fn create_account_posts_request_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/accounts"))
            .and(body_json(json!({"name": "Savings", "initialBalance": 0.0})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!(
                {"id": 2, "name": "Savings", "initialBalance": 0.0, "currentBalance": 0.0}
            )))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let created = client
            .create_account(&AccountRequest {
                name: "Savings".to_owned(),
                initial_balance: 0.0,
            })
            .await
            .unwrap();
        assert_eq!(created.id, AccountId::new(2));
    }

    #[tokio::test]
    async fn update_goal_puts_to_id_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/goals/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5, "name": "Vacation", "targetAmount": 1000.0,
                "currentAmount": 350.0, "deadline": null, "categoryId": null,
                "categoryName": null, "progressPercentage": 35.0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let updated = client
            .update_goal(
                GoalId::new(5),
                &GoalRequest {
                    name: "Vacation".to_owned(),
                    target_amount: 1000.0,
                    deadline: None,
                    category_id: None,
                    current_amount: Some(350.0),
                },
            )
            .await
            .unwrap();
        assert!((updated.current_amount - 350.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn delete_expense_accepts_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/expenses/11"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.delete_expense(ExpenseId::new(11)).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/goals"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.goals().await.unwrap_err();
        assert!(
            matches!(&err, BudgetError::Api { status: 500, message } if message == "boom"),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn unauthorized_is_classified_as_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/incomes"))
            .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.incomes().await.unwrap_err();
        assert!(err.is_auth_error());
    }
}
