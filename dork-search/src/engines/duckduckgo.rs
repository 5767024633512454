//! DuckDuckGo HTML-only endpoint with a templated query URL.
//!
//! The endpoint carries no offset parameter, so every request returns the
//! first page. Result links are wrapped in a `duckduckgo.com/l/?uddg=`
//! redirector which is unwrapped to the real destination.

use crate::engine::BackendAdapter;
use crate::extract::{extract_links, unwrap_query_param};
use crate::types::{Backend, RequestSpec};

use super::fill_template;

/// Default DuckDuckGo URL template.
pub const DUCKDUCKGO_URL_TEMPLATE: &str = "https://duckduckgo.com/html?q={query}";

/// DuckDuckGo HTML results adapter.
#[derive(Debug, Clone)]
pub struct DuckDuckGoAdapter {
    template: String,
}

impl DuckDuckGoAdapter {
    /// Use a different URL template; `{query}` is replaced by the encoded query.
    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Replace a DuckDuckGo redirect link with its destination.
    fn unwrap_redirect(link: String) -> String {
        unwrap_query_param(&link, "duckduckgo.com", "/l/", "uddg").unwrap_or(link)
    }
}

impl Default for DuckDuckGoAdapter {
    fn default() -> Self {
        Self::with_template(DUCKDUCKGO_URL_TEMPLATE)
    }
}

impl BackendAdapter for DuckDuckGoAdapter {
    fn backend(&self) -> Backend {
        Backend::DuckDuckGo
    }

    fn build_request(&self, query: &str, _offset: usize) -> RequestSpec {
        RequestSpec::get(fill_template(&self.template, query))
    }

    fn extract_urls(&self, body: &str) -> Vec<String> {
        extract_links(body)
            .into_iter()
            .map(Self::unwrap_redirect)
            .collect()
    }

    fn supports_pagination(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_DDG_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="result results_links results_links_deep web-result">
    <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.rust-lang.org%2F&amp;rut=abc123">
        Rust Programming Language
    </a>
</div>
<div class="result results_links results_links_deep web-result">
    <a class="result__a" href="https://doc.rust-lang.org/book/">
        The Rust Programming Language Book
    </a>
</div>
<div class="nav-link">
    <form action="/html/" method="post"><input type="submit" value="Next"></form>
</div>
</body>
</html>"#;

    #[test]
    fn build_request_ignores_offset() {
        let adapter = DuckDuckGoAdapter::default();
        let first = adapter.build_request("rust lang", 0);
        let later = adapter.build_request("rust lang", 40);
        assert_eq!(first, later);
        assert_eq!(first.url, "https://duckduckgo.com/html?q=rust%20lang");
        assert!(first.params.is_empty());
    }

    #[test]
    fn extract_unwraps_redirects() {
        let urls = DuckDuckGoAdapter::default().extract_urls(MOCK_DDG_HTML);
        assert_eq!(
            urls,
            vec!["https://www.rust-lang.org/", "https://doc.rust-lang.org/book/"]
        );
    }

    #[test]
    fn extract_empty_html_returns_empty() {
        let urls = DuckDuckGoAdapter::default().extract_urls("<html><body></body></html>");
        assert!(urls.is_empty());
    }

    #[test]
    fn backend_is_duckduckgo() {
        let adapter = DuckDuckGoAdapter::default();
        assert_eq!(adapter.backend(), Backend::DuckDuckGo);
        assert!(!adapter.supports_pagination());
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DuckDuckGoAdapter>();
    }
}
