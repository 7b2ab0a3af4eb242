//! Explicit session context for the identity collaborator.
//!
//! The core never performs authentication itself; it only reads the
//! token and email handed over by whatever issued them. Keeping the
//! session an explicitly constructed value (instead of module-global
//! state) keeps every consumer testable in isolation.

use std::sync::{Mutex, MutexGuard, PoisonError};

use secrecy::{ExposeSecret, SecretString};

/// Shared session state: the bearer token and the signed-in email.
#[derive(Debug, Default)]
pub struct Session {
    /// All state behind a single mutex for thread-safe interior mutability.
    inner: Mutex<SessionInner>,
}

/// Inner mutable state.
#[derive(Debug, Default)]
struct SessionInner {
    /// Bearer token for API calls, if signed in.
    token: Option<SecretString>,
    /// Email of the signed-in user.
    email: Option<String>,
}

impl Session {
    /// Creates a signed-out session.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session already holding credentials.
    #[inline]
    #[must_use]
    pub fn authenticated<T: Into<String>>(token: SecretString, email: T) -> Self {
        let session = Self::new();
        session.log_in(token, email);
        session
    }

    /// Stores credentials received from the identity collaborator.
    #[inline]
    pub fn log_in<T: Into<String>>(&self, token: SecretString, email: T) {
        let mut inner = self.lock();
        inner.token = Some(token);
        inner.email = Some(email.into());
    }

    /// Clears all credentials.
    #[inline]
    pub fn logout(&self) {
        let mut inner = self.lock();
        inner.token = None;
        inner.email = None;
        tracing::debug!("session cleared");
    }

    /// Returns `true` while a token is held.
    #[inline]
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.lock().token.is_some()
    }

    /// Returns the signed-in email, if any.
    #[inline]
    #[must_use]
    pub fn current_email(&self) -> Option<String> {
        self.lock().email.clone()
    }

    /// Returns a copy of the bearer token, if any.
    #[inline]
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.lock().token.clone()
    }

    /// Returns the exposed token string for client construction.
    #[inline]
    #[must_use]
    pub fn token_value(&self) -> Option<String> {
        self.lock()
            .token
            .as_ref()
            .map(|token| token.expose_secret().to_owned())
    }

    /// Acquires the inner lock. A poisoned lock only means another
    /// thread panicked mid-update; the state itself stays consistent.
    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
