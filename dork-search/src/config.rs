//! Harvest configuration with sensible defaults.
//!
//! [`HarvestConfig`] controls which backends are queried, how far each one
//! paginates, how many requests may be in flight, and request pacing.

use crate::error::SearchError;
use crate::types::Backend;

/// Configuration for harvesting a single query.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Which backends to harvest from. Fetched concurrently; results are unioned.
    pub backends: Vec<Backend>,
    /// Maximum number of unique URLs each backend may contribute.
    pub max_results: usize,
    /// Offset step between successive pages.
    pub page_size: usize,
    /// Maximum number of page requests in flight across all backends.
    pub concurrency_limit: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Pause between successive pages of one backend, in milliseconds.
    pub page_delay_ms: u64,
    /// Fixed User-Agent string. If `None`, each backend is assigned a random
    /// one from a built-in list once per harvest.
    pub user_agent: Option<String>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            backends: Backend::all().to_vec(),
            max_results: 100,
            page_size: 10,
            concurrency_limit: 5,
            timeout_seconds: 10,
            page_delay_ms: 100,
            user_agent: None,
        }
    }
}

impl HarvestConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results`, `page_size`, `concurrency_limit` and `timeout_seconds`
    ///   must be greater than 0
    /// - `backends` must not be empty
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.page_size == 0 {
            return Err(SearchError::Config(
                "page_size must be greater than 0".into(),
            ));
        }
        if self.concurrency_limit == 0 {
            return Err(SearchError::Config(
                "concurrency_limit must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.backends.is_empty() {
            return Err(SearchError::Config(
                "at least one backend must be enabled".into(),
            ));
        }
        Ok(())
    }
}
