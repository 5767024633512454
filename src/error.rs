//! Error types for the dork-harvester batch runner.

use dork_search::SearchError;

/// Top-level error type for batch harvesting.
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    /// Configuration file or option error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error (query file, output artifact).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised by the harvesting engine.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The batch was interrupted by the user.
    #[error("interrupted by user")]
    Cancelled,
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, HarvestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_config() {
        let err = HarvestError::Config("bad toml".into());
        assert_eq!(err.to_string(), "config error: bad toml");
    }

    #[test]
    fn search_errors_are_transparent() {
        let err: HarvestError = SearchError::Status { code: 429 }.into();
        assert_eq!(err.to_string(), "unexpected HTTP status 429");
    }

    #[test]
    fn io_errors_convert() {
        let err: HarvestError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().starts_with("I/O error"));
    }
}
