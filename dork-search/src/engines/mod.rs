//! Backend implementations.
//!
//! Each module provides a struct implementing [`crate::engine::BackendAdapter`]
//! that describes a specific search engine's results page.

pub mod bing;
pub mod duckduckgo;
pub mod yahoo;

use std::sync::Arc;

pub use bing::BingAdapter;
pub use duckduckgo::DuckDuckGoAdapter;
pub use yahoo::YahooAdapter;

use crate::engine::BackendAdapter;
use crate::types::Backend;

/// Build the default adapter for `backend`.
pub fn adapter_for(backend: Backend) -> Arc<dyn BackendAdapter> {
    match backend {
        Backend::Bing => Arc::new(BingAdapter::default()),
        Backend::DuckDuckGo => Arc::new(DuckDuckGoAdapter::default()),
        Backend::Yahoo => Arc::new(YahooAdapter::default()),
    }
}

/// Substitute the URL-encoded `query` into a `{query}` placeholder.
pub(crate) fn fill_template(template: &str, query: &str) -> String {
    template.replace("{query}", &urlencoding::encode(query))
}
