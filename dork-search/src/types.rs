//! Core types for backends, page requests and harvest outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// Supported search backends that dork-search can harvest from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Bing, the only backend that honours a pagination offset.
    Bing,
    /// DuckDuckGo HTML endpoint; always returns its first page.
    DuckDuckGo,
    /// Yahoo; always returns its first page.
    Yahoo,
}

impl Backend {
    /// Returns the human-readable name of this backend.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bing => "Bing",
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Yahoo => "Yahoo",
        }
    }

    /// Returns all available backend variants.
    pub fn all() -> &'static [Backend] {
        &[Self::Bing, Self::DuckDuckGo, Self::Yahoo]
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bing" => Ok(Self::Bing),
            "duckduckgo" | "ddg" => Ok(Self::DuckDuckGo),
            "yahoo" => Ok(Self::Yahoo),
            other => Err(SearchError::Config(format!("unknown backend: {other}"))),
        }
    }
}

/// A fully described page request, independent of the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// HTTP method to use.
    pub method: reqwest::Method,
    /// Target URL, with any templated query already substituted.
    pub url: String,
    /// Extra query parameters appended to `url`.
    pub params: Vec<(String, String)>,
}

impl RequestSpec {
    /// A `GET` request for `url` with no extra parameters.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: reqwest::Method::GET,
            url: url.into(),
            params: Vec::new(),
        }
    }

    /// Append a query parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

/// Why a backend's paginated fetch stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The result set reached `max_results`.
    Capped,
    /// The latest page contributed no new URLs, or the backend cannot paginate.
    Exhausted,
    /// A request failed; the partial result set was kept.
    Failed,
    /// The harvest was cancelled.
    Cancelled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Capped => "capped",
            Self::Exhausted => "exhausted",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        })
    }
}

/// What a single backend contributed to a harvest.
#[derive(Debug, Clone, Serialize)]
pub struct BackendReport {
    /// Which backend produced this report.
    pub backend: Backend,
    /// Unique URLs in first-seen order, at most `max_results` long.
    pub urls: Vec<String>,
    /// Number of pages fetched successfully.
    pub pages: usize,
    /// Why pagination stopped.
    pub stop: StopReason,
    /// Description of the failure, when `stop` is [`StopReason::Failed`].
    pub error: Option<String>,
}

impl BackendReport {
    /// Whether this backend's pagination ended on a request failure.
    pub fn failed(&self) -> bool {
        self.stop == StopReason::Failed
    }
}

/// Final combined result of harvesting one query.
#[derive(Debug, Clone, Serialize)]
pub struct HarvestOutcome {
    /// The query that was harvested.
    pub query: String,
    /// Union of every backend's URLs, duplicate-free.
    pub urls: Vec<String>,
    /// One report per configured backend, in configuration order.
    pub backends: Vec<BackendReport>,
}

impl HarvestOutcome {
    /// Number of unique URLs in the combined set.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether no URLs were harvested.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Whether every backend stopped on a request failure.
    pub fn all_failed(&self) -> bool {
        !self.backends.is_empty() && self.backends.iter().all(BackendReport::failed)
    }

    /// The report for `backend`, if it took part in the harvest.
    pub fn report(&self, backend: Backend) -> Option<&BackendReport> {
        self.backends.iter().find(|r| r.backend == backend)
    }
}
