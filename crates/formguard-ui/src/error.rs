//! Error types for form submission.

use thiserror::Error;

/// Errors returned by a [`Submitter`](crate::Submitter).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The receiving side refused the submission.
    #[error("submission rejected: {0}")]
    Rejected(String),

    /// The submission could not be delivered.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Result type alias for submissions.
pub type Result<T> = std::result::Result<T, SubmitError>;
