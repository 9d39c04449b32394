//! Provider Error Types
//!
//! Failures of the remote suggestion and definition collaborators.

use thiserror::Error;

/// Suggestion / definition provider errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Word not found: {0}")]
    NotFound(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProviderError::InvalidResponse(e.to_string())
        } else {
            ProviderError::Network(e.to_string())
        }
    }
}

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;
