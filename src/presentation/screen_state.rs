//! UI state published by the search view-model

use crate::domain::{SearchError, SearchResponse};

/// Published when a successful response lacks its items or total count
pub const NULL_RESULTS_MESSAGE: &str = "Search results or total count are null";
/// Published when a failed search carries no message of its own
pub const DEFAULT_ERROR_MESSAGE: &str = "Response is null or unsuccessful";

/// What the search screen should currently display
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState {
    /// No search has completed yet
    Idle,
    /// A complete search result
    Working(SearchResponse),
    Error(ScreenError),
}

/// Error shown on the search screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenError {
    message: String,
}

impl ScreenError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ScreenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl ScreenState {
    /// Map the outcome of a repository search to the state to publish.
    ///
    /// `Working` is only produced when both the total count and the items are
    /// present; the response is forwarded unchanged.
    pub fn from_search_outcome(outcome: Result<SearchResponse, SearchError>) -> Self {
        match outcome {
            Ok(response) if response.complete().is_some() => ScreenState::Working(response),
            Ok(_) => ScreenState::error(NULL_RESULTS_MESSAGE),
            Err(error) => {
                ScreenState::error(error.message().unwrap_or(DEFAULT_ERROR_MESSAGE))
            }
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ScreenState::Error(ScreenError::new(message))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ScreenState::Idle)
    }
}
