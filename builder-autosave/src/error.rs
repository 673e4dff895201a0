//! Save errors.

use thiserror::Error;

/// Result of one save attempt.
pub type SaveResult = Result<(), SaveError>;

/// Errors a save attempt or the controller can produce.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Generic failure reported by a saver.
    #[error("save failed: {0}")]
    Failed(String),

    /// HTTP layer failed (connection, timeout, etc.).
    #[error("save request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server rejected save with status {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The save endpoint could not be built.
    #[error("invalid save URL: {0}")]
    InvalidUrl(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The attempt was cancelled before it finished.
    #[error("save cancelled")]
    Cancelled,

    /// The controller task is no longer running.
    #[error("auto-save controller stopped")]
    Stopped,
}

impl SaveError {
    /// Whether retrying the same snapshot could succeed.
    ///
    /// Client errors (4xx other than 408 and 429), bad URLs and
    /// serialization failures are permanent.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Failed(_) | Self::Http(_) | Self::Io(_) => true,
            Self::Rejected { status, .. } => {
                !(400..500).contains(status) || *status == 408 || *status == 429
            }
            Self::InvalidUrl(_) | Self::Serialization(_) | Self::Cancelled | Self::Stopped => false,
        }
    }
}
