//! Sequential batch harvesting over a list of queries.
//!
//! Queries are harvested one at a time; each outcome goes to the
//! [`ResultSink`] before the next query starts. A query whose harvest or
//! write fails is logged and skipped. Cancellation stops the batch before
//! the next query and aborts the harvest in flight, whose artifact is then
//! never written.

use std::path::PathBuf;

use dork_search::{MultiBackendHarvester, PageTransport, SearchError};
use tokio_util::sync::CancellationToken;

use crate::output::ResultSink;

/// Query-level events emitted by the runner.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// Harvesting of a query started.
    QueryStarted {
        /// Zero-based position in the batch.
        index: usize,
        /// Number of queries in the batch.
        total: usize,
        /// The query text.
        query: String,
    },

    /// A query's artifact was written.
    QuerySaved {
        /// The query text.
        query: String,
        /// Where the artifact was written.
        path: PathBuf,
        /// Unique URLs in the artifact.
        urls: usize,
    },

    /// A query produced no artifact.
    QueryFailed {
        /// The query text.
        query: String,
        /// Human-readable error description.
        message: String,
    },
}

/// Callback type for receiving batch events.
pub type BatchCallback = Box<dyn Fn(BatchEvent) + Send + Sync>;

/// Totals for a finished (or interrupted) batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Queries whose harvest completed.
    pub harvested: usize,
    /// Artifacts written.
    pub written: usize,
    /// Queries where every backend failed or no artifact was written.
    pub failed: usize,
    /// Sum of unique URLs across written artifacts.
    pub total_urls: usize,
    /// Whether the batch stopped early because of cancellation.
    pub cancelled: bool,
}

/// Drives a harvester over queries and hands each outcome to a sink.
pub struct QueryBatchRunner<T, S> {
    harvester: MultiBackendHarvester<T>,
    sink: S,
    callback: Option<BatchCallback>,
}

impl<T: PageTransport, S: ResultSink> QueryBatchRunner<T, S> {
    /// Create a runner.
    pub fn new(harvester: MultiBackendHarvester<T>, sink: S) -> Self {
        Self {
            harvester,
            sink,
            callback: None,
        }
    }

    /// Attach a batch event observer.
    pub fn with_callback(mut self, callback: BatchCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Harvest every query in order.
    pub async fn run(&self, queries: &[String], cancel: &CancellationToken) -> BatchSummary {
        let mut summary = BatchSummary::default();
        let total = queries.len();

        for (index, query) in queries.iter().enumerate() {
            if cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            tracing::info!(query = %query, index, total, "harvesting query");
            self.emit(BatchEvent::QueryStarted {
                index,
                total,
                query: query.clone(),
            });

            let outcome = match self.harvester.harvest(query, cancel).await {
                Ok(outcome) => outcome,
                Err(SearchError::Cancelled) => {
                    tracing::info!(query = %query, "harvest interrupted");
                    summary.cancelled = true;
                    break;
                }
                Err(err) => {
                    self.record_failure(&mut summary, query, err.to_string());
                    continue;
                }
            };
            summary.harvested += 1;

            // Still written, so a rerun overwrites stale results.
            if outcome.all_failed() {
                tracing::warn!(query = %query, "every backend failed for query");
                summary.failed += 1;
            }

            match self.sink.write(&outcome) {
                Ok(path) => {
                    summary.written += 1;
                    summary.total_urls += outcome.len();
                    tracing::info!(query = %query, urls = outcome.len(), path = %path.display(), "results saved");
                    self.emit(BatchEvent::QuerySaved {
                        query: query.clone(),
                        path,
                        urls: outcome.len(),
                    });
                }
                Err(err) => self.record_failure(&mut summary, query, err.to_string()),
            }
        }

        summary
    }

    fn record_failure(&self, summary: &mut BatchSummary, query: &str, message: String) {
        tracing::error!(query = %query, error = %message, "query produced no results file");
        summary.failed += 1;
        self.emit(BatchEvent::QueryFailed {
            query: query.to_string(),
            message,
        });
    }

    fn emit(&self, event: BatchEvent) {
        if let Some(ref cb) = self.callback {
            cb(event);
        }
    }
}
