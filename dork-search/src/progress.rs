//! Progress events emitted while harvesting.
//!
//! Callback-based reporting decouples the fetch loop from presentation:
//! the CLI drives indicatif bars from these events, tests record them.
//! Events never influence control flow.

use std::sync::Arc;

use crate::types::{Backend, StopReason};

/// Progress events emitted by paginated fetchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A backend started paginating towards `target` URLs.
    FetchStarted {
        /// Backend being fetched.
        backend: Backend,
        /// The backend's cap (`max_results`).
        target: usize,
    },

    /// One page was merged into the backend's result set.
    PageMerged {
        /// Backend the page came from.
        backend: Backend,
        /// URLs on this page that were not already in the set.
        added: usize,
        /// Size of the backend's result set after the merge.
        total: usize,
    },

    /// A backend stopped paginating.
    FetchFinished {
        /// Backend that stopped.
        backend: Backend,
        /// Why it stopped.
        stop: StopReason,
        /// Final size of the backend's result set.
        total: usize,
    },
}

/// Callback type for receiving progress events.
///
/// Shared by every concurrent fetcher of a harvest, hence `Arc`.
pub type ProgressCallback = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use std::sync::Mutex;

    #[test]
    fn callback_receives_events() {
        let events: Arc<Mutex<Vec<ProgressEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let events_clone = Arc::clone(&events);

        let callback: ProgressCallback = Arc::new(move |event| {
            let Ok(mut guard) = events_clone.lock() else {
                return;
            };
            guard.push(event);
        });

        callback(ProgressEvent::FetchStarted {
            backend: Backend::Bing,
            target: 100,
        });
        callback(ProgressEvent::PageMerged {
            backend: Backend::Bing,
            added: 7,
            total: 7,
        });
        callback(ProgressEvent::FetchFinished {
            backend: Backend::Bing,
            stop: StopReason::Exhausted,
            total: 7,
        });

        let guard = events.lock().unwrap();
        assert_eq!(guard.len(), 3);
        assert_eq!(
            guard[1],
            ProgressEvent::PageMerged {
                backend: Backend::Bing,
                added: 7,
                total: 7,
            }
        );
    }
}
