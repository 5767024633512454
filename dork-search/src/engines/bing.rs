//! Bing, the one backend whose pagination offset is honoured.
//!
//! Pages are selected with the `first` query parameter, which counts
//! results rather than pages.

use crate::engine::BackendAdapter;
use crate::extract::extract_links;
use crate::types::{Backend, RequestSpec};

/// Default Bing search endpoint.
pub const BING_SEARCH_URL: &str = "http://www.bing.com/search";

/// Bing results page adapter.
#[derive(Debug, Clone)]
pub struct BingAdapter {
    base_url: String,
}

impl BingAdapter {
    /// Point the adapter at a different endpoint (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for BingAdapter {
    fn default() -> Self {
        Self::with_base_url(BING_SEARCH_URL)
    }
}

impl BackendAdapter for BingAdapter {
    fn backend(&self) -> Backend {
        Backend::Bing
    }

    fn build_request(&self, query: &str, offset: usize) -> RequestSpec {
        RequestSpec::get(self.base_url.as_str())
            .with_param("q", query)
            .with_param("first", offset.to_string())
    }

    fn extract_urls(&self, body: &str) -> Vec<String> {
        extract_links(body)
    }

    fn supports_pagination(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_BING_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<ol id="b_results">
<li class="b_algo">
  <h2><a href="https://www.rust-lang.org/" h="ID=SERP">Rust Programming Language</a></h2>
  <div class="b_caption"><p>A language empowering everyone.</p></div>
</li>
<li class="b_algo">
  <h2><a href="https://doc.rust-lang.org/book/" h="ID=SERP">The Rust Book</a></h2>
</li>
<li class="b_pag"><a href="/search?q=rust&amp;first=11">Next</a></li>
</ol>
</body>
</html>"#;

    #[test]
    fn build_request_uses_first_offset() {
        let adapter = BingAdapter::default();
        let spec = adapter.build_request("site:example.com", 20);
        assert_eq!(spec.url, BING_SEARCH_URL);
        assert_eq!(
            spec.params,
            vec![
                ("q".to_string(), "site:example.com".to_string()),
                ("first".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn extract_skips_relative_pagination_links() {
        let urls = BingAdapter::default().extract_urls(MOCK_BING_HTML);
        assert_eq!(
            urls,
            vec!["https://www.rust-lang.org/", "https://doc.rust-lang.org/book/"]
        );
    }

    #[test]
    fn custom_base_url() {
        let adapter = BingAdapter::with_base_url("http://127.0.0.1:9999/search");
        assert_eq!(adapter.build_request("q", 0).url, "http://127.0.0.1:9999/search");
    }

    #[test]
    fn backend_is_bing() {
        let adapter = BingAdapter::default();
        assert_eq!(adapter.backend(), Backend::Bing);
        assert!(adapter.supports_pagination());
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BingAdapter>();
    }
}
