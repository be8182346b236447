//! Error types for remote data access.

use thiserror::Error;

/// Result type alias for remote operations.
pub type Result<T> = std::result::Result<T, RemoteError>;

/// Errors that can occur while talking to the hosted backend.
///
/// "Not found" is deliberately **not** an error: lookup operations return
/// `Ok(None)` and the pages render an empty state instead of surfacing a
/// failure.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport-level failure (connection refused, DNS, timeout).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for the logs - never shown to the user verbatim
        body: String,
    },

    /// The response body did not match the expected record shape.
    #[error("could not decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A write asked for its representation back and got an empty set.
    #[error("backend returned an empty representation for a write")]
    EmptyRepresentation,
}

impl RemoteError {
    /// Whether retrying could plausibly succeed.
    ///
    /// Transport failures and server-side (5xx) errors are transient;
    /// client errors (4xx) and decode failures are not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Decode(_) | Self::EmptyRepresentation => false,
        }
    }
}
