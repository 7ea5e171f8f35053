//! Authentication service for FitCheck
//!
//! This module provides the login, signup and sign-out flows. A successful
//! flow stores the bearer token in the shared [`SessionState`], which is what
//! moves the navigation layer from the login stack to the main stack.

use crate::{AppError, Result};
use app_state::{Session, SessionState};
use fitcheck_client::WardrobeApi;
use std::sync::Arc;

/// Username and password as typed on the login or signup screen
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name
    pub username: String,
    /// Account password
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Create credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    /// Check that both fields are filled in
    ///
    /// The username is trimmed; the password is taken verbatim.
    pub fn validate(&self) -> Result<()> {
        let missing_username = self.username.trim().is_empty();
        let missing_password = self.password.is_empty();

        match (missing_username, missing_password) {
            (false, false) => Ok(()),
            (true, true) => Err(AppError::Validation(
                "Please enter a username and password.".to_string(),
            )),
            (true, false) => Err(AppError::Validation("Please enter a username.".to_string())),
            (false, true) => Err(AppError::Validation("Please enter a password.".to_string())),
        }
    }
}

/// Authentication service
///
/// # Example
///
/// ```rust,no_run
/// use app_core::{AuthService, Credentials};
/// use app_state::{SessionState, SessionStore};
/// use fitcheck_client::{ClientConfig, FitCheckClient};
/// use std::sync::Arc;
///
/// # async fn run(store: SessionStore) -> Result<(), Box<dyn std::error::Error>> {
/// let api = Arc::new(FitCheckClient::new(ClientConfig::default())?);
/// let auth = AuthService::new(api, SessionState::new(store));
///
/// auth.sign_in(Credentials::new("alice", "secret")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn WardrobeApi>,
    session: SessionState,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(api: Arc<dyn WardrobeApi>, session: SessionState) -> Self {
        Self { api, session }
    }

    /// Load the persisted token at boot
    pub fn restore(&self) -> Result<Session> {
        Ok(self.session.restore()?)
    }

    /// Log in and store the returned token
    pub async fn sign_in(&self, credentials: Credentials) -> Result<()> {
        credentials.validate()?;

        let username = credentials.username.trim();
        let token = self.api.login(username, &credentials.password).await?;
        self.session.sign_in(token)?;

        tracing::debug!(username, "login succeeded");
        Ok(())
    }

    /// Create an account and store the returned token
    pub async fn sign_up(&self, credentials: Credentials) -> Result<()> {
        credentials.validate()?;

        let username = credentials.username.trim();
        let token = self.api.signup(username, &credentials.password).await?;
        self.session.sign_in(token)?;

        tracing::debug!(username, "signup succeeded");
        Ok(())
    }

    /// Forget the token
    pub fn sign_out(&self) -> Result<()> {
        Ok(self.session.sign_out()?)
    }

    /// Shared session handle
    pub fn session(&self) -> &SessionState {
        &self.session
    }
}
