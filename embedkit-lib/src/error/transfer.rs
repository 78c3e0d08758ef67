//! Transfer error types

use std::time::Duration;

/// Errors that can occur while moving a file to the upload endpoint.
///
/// Transfer failures are local to the affected item and never cancel
/// sibling uploads in the same batch.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The endpoint answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body text, if any.
        message: String,
    },

    /// Network error during the transfer.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The transfer timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The request body could not be assembled.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The transfer was cancelled cooperatively.
    #[error("transfer cancelled")]
    Cancelled,
}

impl TransferError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if a manual retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => matches!(status, 408 | 429 | 500 | 502 | 503 | 504),
            Self::Network(_) => true,
            Self::Timeout(_) => true,
            _ => false,
        }
    }
}
