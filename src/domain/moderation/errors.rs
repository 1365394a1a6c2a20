use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure taxonomy at the service boundary.
///
/// Raw store errors never cross into UI code; they are caught, logged
/// and translated into one of these variants so callers can branch on
/// kind rather than on message text.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum GovernanceError {
    /// A required dependency is missing (no store connection, no active
    /// city). Recoverable: retry once the dependency is back.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// Insufficient role or wrong city scope. Not retryable with the
    /// same actor.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed input (empty content id, blank rejection reason,
    /// transition out of a terminal state). Not retryable until the
    /// caller corrects the input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The moderation id does not resolve. A normal negative result.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl GovernanceError {
    /// Whether retrying the same call later can succeed without the
    /// caller changing anything.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GovernanceError::Unavailable(_))
    }
}
