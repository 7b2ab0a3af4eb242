//! Error types for the Monthly Budget client core.

/// Convenience alias for results produced by this crate.
pub type Result<T> = core::result::Result<T, BudgetError>;

/// All errors that can occur when using the Monthly Budget client.
#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    /// HTTP transport failed (connection, timeout, invalid response).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The server answered with a non-success status code.
    #[error("api error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the server.
        status: u16,
        /// Raw response body, or a placeholder when the body is unreadable.
        message: String,
    },

    /// No access token was configured on the client builder.
    #[error("no access token configured")]
    MissingToken,
}

impl BudgetError {
    /// Returns `true` for API errors in the 401/403 authorization class.
    ///
    /// Session expiry handling lives outside this crate; callers use this
    /// to decide whether to hand the failure to the identity layer.
    #[inline]
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Api {
                status: 401 | 403,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_from_serde_json() {
        let serde_err = serde_json::from_str::<String>("not json").unwrap_err();
        let err = BudgetError::from(serde_err);
        assert!(matches!(err, BudgetError::Serialization(_)));
        assert!(err.to_string().contains("serialization error"));
    }

    #[test]
    fn error_api_display() {
        let err = BudgetError::Api {
            status: 404,
            message: "account not found".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("account not found"));
    }

    #[test]
    fn error_missing_token_display() {
        let err = BudgetError::MissingToken;
        assert!(err.to_string().contains("token"));
    }

    #[test]
    fn auth_error_classification() {
        let unauthorized = BudgetError::Api {
            status: 401,
            message: String::new(),
        };
        let not_found = BudgetError::Api {
            status: 404,
            message: String::new(),
        };
        assert!(unauthorized.is_auth_error());
        assert!(!not_found.is_auth_error());
        assert!(!BudgetError::MissingToken.is_auth_error());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BudgetError>();
    }
}
