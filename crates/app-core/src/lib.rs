//! Core application logic for FitCheck
//!
//! This crate contains the services behind each screen: authentication,
//! wardrobe management and outfit recommendations. Services validate input
//! locally, call the backend through [`fitcheck_client::WardrobeApi`] and
//! keep the shared session in step with the backend's answers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod outfits;
pub mod wardrobe;

#[cfg(test)]
mod test_utils;

pub use auth::{AuthService, Credentials};
pub use outfits::{BaseItem, OutfitService, RecommendationForm};
pub use wardrobe::{NewItem, WardrobeService};

use app_state::{RequestError, SessionState, SessionStateError};
use fitcheck_client::ApiError;
use thiserror::Error;

/// Result type for application operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced to the user as notices
///
/// Messages are shown raw; [`AppError::title`] supplies the notice title.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// A required form field is missing; no request was sent
    #[error("{0}")]
    Validation(String),

    /// Login or signup was rejected
    #[error("{0}")]
    Auth(String),

    /// The backend no longer accepts the token
    #[error("Your session has expired. Please sign in again.")]
    SessionExpired,

    /// Loading the wardrobe failed
    #[error("{0}")]
    Items(String),

    /// Adding an item failed
    #[error("{0}")]
    Upload(String),

    /// Deleting an item failed
    #[error("{0}")]
    Delete(String),

    /// Generating an outfit failed
    #[error("{0}")]
    Recommendation(String),

    /// The backend could not be reached
    #[error("{0}")]
    Network(String),

    /// The screen already has a request in flight
    #[error("Please wait for the current request to finish.")]
    Busy,

    /// The request was abandoned because its screen went away
    #[error("Request cancelled")]
    Cancelled,

    /// The action is not offered on the current screen
    #[error("{0}")]
    ActionUnavailable(String),

    /// Device storage failed
    #[error("{0}")]
    Storage(String),
}

impl AppError {
    /// Title of the notice that shows this error
    pub fn title(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Missing information",
            AppError::Auth(_) => "Sign-in failed",
            AppError::SessionExpired => "Session expired",
            AppError::Items(_) => "Could not load wardrobe",
            AppError::Upload(_) => "Upload failed",
            AppError::Delete(_) => "Delete failed",
            AppError::Recommendation(_) => "Recommendation failed",
            AppError::Network(_) => "Network error",
            AppError::Busy => "Please wait",
            AppError::Cancelled => "Cancelled",
            AppError::ActionUnavailable(_) => "Not available",
            AppError::Storage(_) => "Storage error",
        }
    }

    /// Whether the app must return to the login stack
    pub fn is_session_expired(&self) -> bool {
        matches!(self, AppError::SessionExpired)
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(e) => AppError::Network(format!("Could not reach the server: {}", e)),
            ApiError::Auth(message) => AppError::Auth(message),
            ApiError::SessionExpired => AppError::SessionExpired,
            ApiError::Items(message) => AppError::Items(message),
            ApiError::Upload(message) => AppError::Upload(message),
            ApiError::Delete(message) => AppError::Delete(message),
            ApiError::Recommendation(message) => AppError::Recommendation(message),
        }
    }
}

impl From<SessionStateError> for AppError {
    fn from(err: SessionStateError) -> Self {
        match err {
            SessionStateError::EmptyToken => {
                AppError::Auth("The server did not return an access token.".to_string())
            }
            SessionStateError::Storage(e) => AppError::Storage(e.to_string()),
        }
    }
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Busy => AppError::Busy,
            RequestError::Cancelled => AppError::Cancelled,
        }
    }
}

/// Bearer token for an authenticated call; a missing token means the
/// session is already gone
pub(crate) fn require_token(session: &SessionState) -> Result<String> {
    session.token().ok_or(AppError::SessionExpired)
}

/// Convert a backend failure, signing out first when the token was rejected
pub(crate) fn settle(session: &SessionState, err: ApiError) -> AppError {
    if err.is_session_expired() {
        tracing::warn!("backend rejected the session token, signing out");
        if let Err(e) = session.sign_out() {
            tracing::warn!(error = %e, "failed to clear stored token");
        }
    }
    err.into()
}
