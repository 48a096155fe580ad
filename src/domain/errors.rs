//! Domain-specific error types

use thiserror::Error;

/// Errors a repository search can fail with
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("rate limited: {message}")]
    RateLimited { message: String },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("Search query must not be empty")]
    InvalidQuery,

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("search failed")]
    Unknown(Option<String>),
}

impl SearchError {
    /// The message carried by this error, if any.
    ///
    /// Blank messages count as absent.
    pub fn message(&self) -> Option<&str> {
        let message = match self {
            SearchError::Network(message)
            | SearchError::Decode(message)
            | SearchError::Configuration(message)
            | SearchError::Http { message, .. }
            | SearchError::RateLimited { message } => Some(message.as_str()),
            SearchError::InvalidQuery => Some("Search query must not be empty"),
            SearchError::Unknown(message) => message.as_deref(),
        };
        message.filter(|m| !m.trim().is_empty())
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            SearchError::Decode(error.to_string())
        } else {
            SearchError::Network(error.to_string())
        }
    }
}
