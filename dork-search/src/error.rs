//! Error types for the dork-search crate.
//!
//! Request-level failures (`Http`, `Timeout`, `Status`) are contained by the
//! paginated fetcher and never escape a harvest. The remaining variants are
//! surfaced to callers.

/// Errors that can occur while harvesting search results.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request to a search engine failed to complete.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A request exceeded the configured per-request timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The engine answered with a non-success status code.
    #[error("unexpected HTTP status {code}")]
    Status {
        /// The numeric HTTP status returned by the engine.
        code: u16,
    },

    /// Invalid harvest configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The harvest was cancelled before it completed.
    #[error("harvest cancelled")]
    Cancelled,
}

impl SearchError {
    /// Whether this error is a request-level failure that should stop only
    /// the backend that produced it.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Timeout(_) | Self::Status { .. }
        )
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                code: status.as_u16(),
            }
        } else {
            Self::Http(err.to_string())
        }
    }
}

/// Convenience type alias for dork-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
