/*
[INPUT]:  Error sources (HTTP transport, status codes, serialization, URLs)
[OUTPUT]: Structured error types with retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the order book feed adapter
#[derive(Error, Debug)]
pub enum FeedError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed answered with a non-success status
    #[error("order book feed returned status {code}")]
    Status { code: u16 },

    /// Body could not be decoded into order book entries
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FeedError {
    /// Check if the error is worth retrying on the next poll
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FeedError::Http(_) | FeedError::Status { .. } | FeedError::Serialization(_)
        )
    }

    /// Create a status error from a response status code
    pub fn status(status: StatusCode) -> Self {
        FeedError::Status {
            code: status.as_u16(),
        }
    }
}

/// Result type alias for feed operations
pub type Result<T> = std::result::Result<T, FeedError>;
