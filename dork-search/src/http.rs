//! Shared HTTP transport and client identity rotation.
//!
//! One [`reqwest::Client`] (and therefore one connection pool) is built per
//! process and shared by every request. Each backend in a harvest gets its
//! own [`ClientIdentity`], picked once and sent with every page it requests.

use std::future::Future;
use std::time::Duration;

use rand::seq::SliceRandom;

use crate::config::HarvestConfig;
use crate::error::SearchError;
use crate::types::RequestSpec;

/// Realistic browser User-Agent strings to pick identities from.
pub(crate) const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // SAFETY: USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

/// The request signature a backend presents for the duration of one harvest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    user_agent: String,
}

impl ClientIdentity {
    /// A randomly chosen browser identity.
    pub fn random() -> Self {
        Self::fixed(random_user_agent())
    }

    /// A caller-supplied identity.
    pub fn fixed(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    /// Pick the identity for one backend: the configured override, or a
    /// random browser User-Agent.
    pub fn for_config(config: &HarvestConfig) -> Self {
        match config.user_agent {
            Some(ref custom) => Self::fixed(custom.as_str()),
            None => Self::random(),
        }
    }

    /// The User-Agent header value.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Sends a page request and returns the response body.
///
/// The production implementation is [`HttpTransport`]; tests substitute
/// in-memory transports to script responses or count in-flight requests.
pub trait PageTransport: Send + Sync {
    /// Perform `request` presenting `identity`, returning the body text.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Timeout`], [`SearchError::Status`] or
    /// [`SearchError::Http`] when the request does not succeed.
    fn fetch(
        &self,
        request: &RequestSpec,
        identity: &ClientIdentity,
    ) -> impl Future<Output = Result<String, SearchError>> + Send;
}

/// [`PageTransport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the client cannot be constructed.
    pub fn new(config: &HarvestConfig) -> Result<Self, SearchError> {
        Ok(Self {
            client: build_client(config)?,
        })
    }
}

impl PageTransport for HttpTransport {
    async fn fetch(
        &self,
        request: &RequestSpec,
        identity: &ClientIdentity,
    ) -> Result<String, SearchError> {
        tracing::trace!(url = %request.url, "page request");

        let response = self
            .client
            .request(request.method.clone(), &request.url)
            .query(&request.params)
            .header(reqwest::header::USER_AGENT, identity.user_agent())
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        tracing::trace!(bytes = body.len(), "page response received");
        Ok(body)
    }
}

/// Build a [`reqwest::Client`] configured for search engine scraping.
///
/// The client has:
/// - Cookie store enabled (for consent pages, etc.)
/// - Per-request timeout from config
/// - Brotli and gzip decompression
///
/// The User-Agent is not set here; it is sent per request from the
/// backend's [`ClientIdentity`].
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &HarvestConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}
