//! Concurrent multi-backend harvest for a single query.
//!
//! One [`PaginatedFetcher`] per backend runs concurrently; all of them share
//! a semaphore owned by this harvest invocation, so the number of in-flight
//! page requests never exceeds `concurrency_limit`. Every backend is given
//! its own [`ClientIdentity`] for the whole invocation.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::config::HarvestConfig;
use crate::engine::BackendAdapter;
use crate::engines::adapter_for;
use crate::error::SearchError;
use crate::http::{ClientIdentity, PageTransport};
use crate::progress::ProgressCallback;
use crate::types::{BackendReport, HarvestOutcome};

use super::paginate::{FetchContext, PaginatedFetcher};
use super::result_set::ResultSet;

/// Runs every configured backend for a query and unions their results.
pub struct MultiBackendHarvester<T> {
    config: HarvestConfig,
    transport: Arc<T>,
    adapters: Vec<Arc<dyn BackendAdapter>>,
    progress: Option<ProgressCallback>,
}

impl<T: PageTransport> MultiBackendHarvester<T> {
    /// Create a harvester for the backends listed in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid.
    pub fn new(config: HarvestConfig, transport: Arc<T>) -> Result<Self, SearchError> {
        config.validate()?;
        let adapters = config.backends.iter().map(|b| adapter_for(*b)).collect();
        Ok(Self {
            config,
            transport,
            adapters,
            progress: None,
        })
    }

    /// Replace the adapters derived from the config, e.g. to point them at a
    /// mock server.
    pub fn with_adapters(mut self, adapters: Vec<Arc<dyn BackendAdapter>>) -> Self {
        self.adapters = adapters;
        self
    }

    /// Attach a progress observer.
    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// The configuration this harvester runs with.
    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Harvest `query` from every backend concurrently.
    ///
    /// Backend failures are contained in the per-backend reports; the
    /// combined URL list is the union of every backend's URLs, in backend
    /// order then first-seen order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Cancelled`] if `cancel` fired during the harvest.
    pub async fn harvest(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<HarvestOutcome, SearchError> {
        tracing::trace!(query, backends = self.adapters.len(), "harvest started");

        let gate = Semaphore::new(self.config.concurrency_limit);
        let ctx = FetchContext {
            config: &self.config,
            transport: self.transport.as_ref(),
            gate: &gate,
            progress: self.progress.as_ref(),
            cancel,
        };

        let fetches: Vec<_> = self
            .adapters
            .iter()
            .map(|adapter| {
                let identity = ClientIdentity::for_config(&self.config);
                tracing::trace!(backend = %adapter.backend(), ua = identity.user_agent(), "identity assigned");
                PaginatedFetcher::new(adapter.as_ref(), identity, &ctx).run(query)
            })
            .collect();

        let reports = futures::future::join_all(fetches).await;

        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let urls = union(&reports);
        let failed = reports.iter().filter(|r| r.failed()).count();
        tracing::debug!(total = urls.len(), failed, "harvest finished");

        Ok(HarvestOutcome {
            query: query.to_string(),
            urls,
            backends: reports,
        })
    }
}

/// Union every report's URLs by exact string equality.
pub fn union(reports: &[BackendReport]) -> Vec<String> {
    let mut combined = ResultSet::unbounded();
    for report in reports {
        combined.merge(report.urls.iter().cloned());
    }
    combined.into_vec()
}
