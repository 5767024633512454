//! Trait definition for pluggable search backends.
//!
//! Each backend (Bing, DuckDuckGo, Yahoo) implements [`BackendAdapter`] to
//! describe how one page is requested and how URLs are pulled out of the
//! response. Adapters never perform I/O themselves; the paginated fetcher
//! sends the [`RequestSpec`] through a [`crate::http::PageTransport`].

use crate::types::{Backend, RequestSpec};

/// A pluggable search backend.
///
/// Implementors describe a specific search engine's request shape and
/// extract candidate URLs from its HTML. Each backend handles its own:
///
/// - URL construction with query encoding
/// - Pagination parameter (or lack of one)
/// - Link extraction and redirect unwrapping
///
/// All implementations must be `Send + Sync` for concurrent fetching.
pub trait BackendAdapter: Send + Sync {
    /// Returns which [`Backend`] variant this implementation represents.
    fn backend(&self) -> Backend;

    /// Build the request for the page starting at `offset`.
    ///
    /// Backends that cannot paginate ignore `offset` and always describe
    /// their first page.
    fn build_request(&self, query: &str, offset: usize) -> RequestSpec;

    /// Extract every absolute URL linked from `body`.
    ///
    /// Malformed markup yields an empty vector rather than an error.
    fn extract_urls(&self, body: &str) -> Vec<String>;

    /// Whether [`build_request`](Self::build_request) honours `offset`.
    fn supports_pagination(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A mock adapter for testing trait bounds and default methods.
    struct MockAdapter {
        backend: Backend,
    }

    impl BackendAdapter for MockAdapter {
        fn backend(&self) -> Backend {
            self.backend
        }

        fn build_request(&self, query: &str, offset: usize) -> RequestSpec {
            RequestSpec::get("https://mock.test/search")
                .with_param("q", query)
                .with_param("o", offset.to_string())
        }

        fn extract_urls(&self, body: &str) -> Vec<String> {
            body.lines().map(str::to_owned).collect()
        }

        fn supports_pagination(&self) -> bool {
            true
        }
    }

    #[test]
    fn mock_adapter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockAdapter>();
    }

    #[test]
    fn adapter_is_object_safe() {
        let adapter: Box<dyn BackendAdapter> = Box::new(MockAdapter {
            backend: Backend::Yahoo,
        });
        assert_eq!(adapter.backend(), Backend::Yahoo);
    }

    #[test]
    fn build_request_carries_offset() {
        let adapter = MockAdapter {
            backend: Backend::Bing,
        };
        let spec = adapter.build_request("rust", 20);
        assert!(spec.params.contains(&("o".to_string(), "20".to_string())));
    }
}
