use std::fmt;

use async_trait::async_trait;

use super::types::{BookRecord, HighlightRecord};

/// Errors that can occur while talking to the highlight service.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Client misconfigured (bad base URL, unusable token).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success status.
    Api { status: u16, message: String },
    /// Response body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Where books and highlights come from.
///
/// The TUI only ever holds an `Arc<dyn HighlightSource>`, so tests can swap
/// in a canned implementation.
#[async_trait]
pub trait HighlightSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Fetch the user's books in one request.
    async fn fetch_books(&self) -> Result<Vec<BookRecord>, ApiError>;

    /// Fetch the highlights of one book in one request.
    async fn fetch_highlights(&self, book_id: i64) -> Result<Vec<HighlightRecord>, ApiError>;
}
