//! Yahoo: templated query URL, first page only.
//!
//! Organic links go through `r.search.yahoo.com` with the destination
//! percent-encoded in an `RU=` path segment.

use crate::engine::BackendAdapter;
use crate::extract::{extract_links, unwrap_path_segment};
use crate::types::{Backend, RequestSpec};

use super::fill_template;

/// Default Yahoo URL template.
pub const YAHOO_URL_TEMPLATE: &str = "https://search.yahoo.com/search?p={query}";

/// Yahoo results adapter.
#[derive(Debug, Clone)]
pub struct YahooAdapter {
    template: String,
}

impl YahooAdapter {
    /// Use a different URL template; `{query}` is replaced by the encoded query.
    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::with_template(YAHOO_URL_TEMPLATE)
    }
}

impl BackendAdapter for YahooAdapter {
    fn backend(&self) -> Backend {
        Backend::Yahoo
    }

    fn build_request(&self, query: &str, _offset: usize) -> RequestSpec {
        RequestSpec::get(fill_template(&self.template, query))
    }

    fn extract_urls(&self, body: &str) -> Vec<String> {
        extract_links(body)
            .into_iter()
            .map(|link| unwrap_path_segment(&link, "search.yahoo.com", "RU=").unwrap_or(link))
            .collect()
    }

    fn supports_pagination(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_YAHOO_HTML: &str = r#"<html><body>
<div class="algo"><h3><a href="https://r.search.yahoo.com/_ylt=Awr/RV=2/RE=1/RO=10/RU=https%3a%2f%2fexample.com%2fadmin/RK=2/RS=abc-">Admin</a></h3></div>
<div class="algo"><h3><a href="https://www.example.org/">Direct</a></h3></div>
<a href="https://search.yahoo.com/preferences">Settings</a>
</body></html>"#;

    #[test]
    fn build_request_substitutes_query() {
        let spec = YahooAdapter::default().build_request("intitle:index of", 10);
        assert_eq!(spec.url, "https://search.yahoo.com/search?p=intitle%3Aindex%20of");
        assert!(spec.params.is_empty());
    }

    #[test]
    fn extract_unwraps_redirects_and_keeps_others() {
        let urls = YahooAdapter::default().extract_urls(MOCK_YAHOO_HTML);
        assert_eq!(
            urls,
            vec![
                "https://example.com/admin",
                "https://www.example.org/",
                "https://search.yahoo.com/preferences",
            ]
        );
    }

    #[test]
    fn backend_is_yahoo() {
        let adapter = YahooAdapter::default();
        assert_eq!(adapter.backend(), Backend::Yahoo);
        assert!(!adapter.supports_pagination());
    }
}
