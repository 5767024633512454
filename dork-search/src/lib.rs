//! # dork-search
//!
//! Concurrent, paginated URL harvesting across public search engines.
//!
//! For a single query this crate pages through several search backends at
//! once, pulls every absolute link out of each results page, and merges
//! them into a duplicate-free set per backend, then one combined set.
//!
//! ## Design
//!
//! - Backends (Bing, DuckDuckGo, Yahoo) are described by [`BackendAdapter`]
//!   implementations: request shape, link extraction, pagination support
//! - Each backend paginates until it reaches `max_results`, a page adds
//!   nothing new, or a request fails
//! - A per-harvest semaphore bounds in-flight requests across all backends
//! - Each backend presents its own randomly chosen User-Agent per harvest
//! - Graceful degradation: a failing backend never aborts its siblings

pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod extract;
pub mod http;
pub mod orchestrator;
pub mod progress;
pub mod types;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

pub use config::HarvestConfig;
pub use engine::BackendAdapter;
pub use error::{Result, SearchError};
pub use http::{ClientIdentity, HttpTransport, PageTransport};
pub use orchestrator::harvest::MultiBackendHarvester;
pub use orchestrator::result_set::ResultSet;
pub use progress::{ProgressCallback, ProgressEvent};
pub use types::{Backend, BackendReport, HarvestOutcome, RequestSpec, StopReason};

/// Harvest URLs for `query` from every backend in `config`.
///
/// Builds a one-off HTTP transport. Callers harvesting many queries should
/// build one [`HttpTransport`] and reuse it through a
/// [`MultiBackendHarvester`] so the connection pool is shared.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid, or
/// [`SearchError::Http`] if the HTTP client cannot be built. Individual
/// backend failures are reported in the outcome, not as errors.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> dork_search::Result<()> {
/// let config = dork_search::HarvestConfig::default();
/// let outcome = dork_search::harvest("inurl:login.php", &config).await?;
/// for url in &outcome.urls {
///     println!("{url}");
/// }
/// # Ok(())
/// # }
/// ```
pub async fn harvest(query: &str, config: &HarvestConfig) -> Result<HarvestOutcome> {
    config.validate()?;
    let transport = Arc::new(HttpTransport::new(config)?);
    MultiBackendHarvester::new(config.clone(), transport)?
        .harvest(query, &CancellationToken::new())
        .await
}
