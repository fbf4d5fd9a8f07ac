//! Submission error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Submission error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Submit error: {} at {}:{}", message, file, line)]
pub struct SubmitError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SubmitError {
    /// Creates a new submission error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("HTTP error: {}", err))
    }
}

impl From<tokio::task::JoinError> for SubmitError {
    #[track_caller]
    fn from(err: tokio::task::JoinError) -> Self {
        Self::new(format!("Submission task failed: {}", err))
    }
}
