//! Per-backend pagination as an explicit state machine.
//!
//! ```text
//!                 page added URLs, under cap, backend paginates
//!               ┌───────────────┐
//!               ▼               │
//!         ┌──────────┐──────────┘
//!  start ─► Fetching ├── set reached max_results ─────────► Capped
//!         └────┬─────┘── page added nothing / no paging ──► Exhausted
//!              ├──────── request failed ──────────────────► Failed
//!              └──────── cancellation token fired ────────► Cancelled
//! ```
//!
//! Pages are requested strictly in increasing offset order and each page is
//! merged before the next request is built. Request failures stop only this
//! backend; the partial result set is kept.

use std::time::Duration;

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::config::HarvestConfig;
use crate::engine::BackendAdapter;
use crate::error::SearchError;
use crate::http::{ClientIdentity, PageTransport};
use crate::progress::{ProgressCallback, ProgressEvent};
use crate::types::{BackendReport, RequestSpec, StopReason};

use super::result_set::ResultSet;

/// State of one backend's pagination.
#[derive(Debug)]
pub enum FetchState {
    /// The page at `offset` is next.
    Fetching {
        /// Pagination offset of the next request.
        offset: usize,
    },
    /// The latest page contributed nothing new, or the backend cannot paginate.
    Exhausted,
    /// The result set reached its cap.
    Capped,
    /// A request failed.
    Failed(SearchError),
    /// The harvest was cancelled.
    Cancelled,
}

impl FetchState {
    /// Whether pagination has stopped.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Fetching { .. })
    }
}

/// Decide the next state after a page contributed `added` new URLs.
///
/// `next_offset` is `None` when the offset would overflow, which ends
/// pagination as exhausted.
pub fn after_page(
    results: &ResultSet,
    added: usize,
    paginates: bool,
    next_offset: Option<usize>,
) -> FetchState {
    if results.is_full() {
        return FetchState::Capped;
    }
    match next_offset {
        Some(offset) if added > 0 && paginates => FetchState::Fetching { offset },
        _ => FetchState::Exhausted,
    }
}

/// Everything the fetchers of one harvest share.
pub struct FetchContext<'a, T> {
    /// Harvest limits and pacing.
    pub config: &'a HarvestConfig,
    /// Process-wide transport.
    pub transport: &'a T,
    /// Bounds in-flight requests across every backend of the harvest.
    pub gate: &'a Semaphore,
    /// Optional progress observer.
    pub progress: Option<&'a ProgressCallback>,
    /// Stops all fetchers when cancelled.
    pub cancel: &'a CancellationToken,
}

/// Drives one backend's adapter across successive pages.
pub struct PaginatedFetcher<'a, T> {
    adapter: &'a dyn BackendAdapter,
    identity: ClientIdentity,
    ctx: &'a FetchContext<'a, T>,
}

impl<'a, T: PageTransport> PaginatedFetcher<'a, T> {
    /// Create a fetcher presenting `identity` on every page it requests.
    pub fn new(
        adapter: &'a dyn BackendAdapter,
        identity: ClientIdentity,
        ctx: &'a FetchContext<'a, T>,
    ) -> Self {
        Self {
            adapter,
            identity,
            ctx,
        }
    }

    /// Paginate until capped, exhausted, failed or cancelled.
    ///
    /// Never returns an error: failures are logged and recorded in the
    /// report alongside whatever URLs were gathered before them.
    pub async fn run(self, query: &str) -> BackendReport {
        let backend = self.adapter.backend();
        let mut results = ResultSet::bounded(self.ctx.config.max_results);
        let mut pages = 0;

        self.emit(ProgressEvent::FetchStarted {
            backend,
            target: self.ctx.config.max_results,
        });

        let mut state = if results.is_full() {
            FetchState::Capped
        } else {
            FetchState::Fetching { offset: 0 }
        };

        let (stop, error) = loop {
            state = match state {
                FetchState::Fetching { offset } => {
                    self.step(query, offset, &mut results, &mut pages).await
                }
                FetchState::Capped => break (StopReason::Capped, None),
                FetchState::Exhausted => break (StopReason::Exhausted, None),
                FetchState::Failed(err) => break (StopReason::Failed, Some(err.to_string())),
                FetchState::Cancelled => break (StopReason::Cancelled, None),
            };
        };

        tracing::debug!(%backend, %stop, pages, total = results.len(), "pagination finished");
        self.emit(ProgressEvent::FetchFinished {
            backend,
            stop,
            total: results.len(),
        });

        BackendReport {
            backend,
            urls: results.into_vec(),
            pages,
            stop,
            error,
        }
    }

    /// Fetch and merge the page at `offset`, returning the next state.
    async fn step(
        &self,
        query: &str,
        offset: usize,
        results: &mut ResultSet,
        pages: &mut usize,
    ) -> FetchState {
        let backend = self.adapter.backend();
        let request = self.adapter.build_request(query, offset);

        let fetched = tokio::select! {
            biased;
            () = self.ctx.cancel.cancelled() => return FetchState::Cancelled,
            fetched = self.fetch_gated(&request) => fetched,
        };

        let body = match fetched {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(%backend, offset, error = %err, transient = err.is_transient(), "backend request failed");
                return FetchState::Failed(err);
            }
        };
        *pages += 1;

        let page = self.adapter.extract_urls(&body);
        let found = page.len();
        let added = results.merge(page);
        tracing::trace!(%backend, offset, found, added, total = results.len(), "page merged");

        self.emit(ProgressEvent::PageMerged {
            backend,
            added,
            total: results.len(),
        });

        let next = after_page(
            results,
            added,
            self.adapter.supports_pagination(),
            offset.checked_add(self.ctx.config.page_size),
        );

        let delay = self.ctx.config.page_delay_ms;
        if !next.is_terminal() && delay > 0 {
            tokio::select! {
                biased;
                () = self.ctx.cancel.cancelled() => return FetchState::Cancelled,
                () = tokio::time::sleep(Duration::from_millis(delay)) => {}
            }
        }

        next
    }

    /// Send `request` while holding one of the harvest's gate permits.
    ///
    /// The gate is owned by the harvest and never closed while fetchers
    /// run, so `acquire` only fails if that invariant is broken.
    async fn fetch_gated(&self, request: &RequestSpec) -> Result<String, SearchError> {
        let _permit = self
            .ctx
            .gate
            .acquire()
            .await
            .map_err(|_| SearchError::Http("request gate closed".into()))?;
        self.ctx.transport.fetch(request, &self.identity).await
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(cb) = self.ctx.progress {
            cb(event);
        }
    }
}
