//! FitCheck API Client Library
//!
//! This crate provides a typed client for the FitCheck backend: account
//! login and signup, wardrobe item storage, and outfit recommendations.
//! All business logic lives on the server; the client only shapes requests,
//! attaches the bearer token and normalizes responses into [`ApiError`]s.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod http;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use api::{FitCheckClient, WardrobeApi};
pub use http::ClientConfig;
pub use types::{
    Coords, ImageRecommendation, ImageUpload, ItemUpload, OutfitSelection, PromptRecommendation,
    SelectedItem, WardrobeItem,
};

/// Result type for FitCheck API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Error types for FitCheck API operations
///
/// Each endpoint family has its own variant so callers can title their
/// notices without inspecting status codes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Login or signup was rejected, or the response carried no token
    #[error("{0}")]
    Auth(String),

    /// The backend answered 401 to an authenticated call
    #[error("Your session has expired. Please sign in again.")]
    SessionExpired,

    /// Listing wardrobe items failed
    #[error("{0}")]
    Items(String),

    /// Adding a wardrobe item failed
    #[error("{0}")]
    Upload(String),

    /// Deleting a wardrobe item failed
    #[error("{0}")]
    Delete(String),

    /// Outfit generation failed
    #[error("{0}")]
    Recommendation(String),
}

impl ApiError {
    /// Whether the caller must sign out
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_raw() {
        let err = ApiError::Upload("Image too large".to_string());
        assert_eq!(err.to_string(), "Image too large");
        assert!(!err.is_session_expired());
    }

    #[test]
    fn test_session_expired() {
        let err = ApiError::SessionExpired;
        assert!(err.is_session_expired());
        assert!(err.to_string().contains("expired"));
    }
}
