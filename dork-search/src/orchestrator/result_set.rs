//! Insertion-ordered, duplicate-free URL collection with an optional cap.
//!
//! URLs are compared by exact string equality. Once the cap is reached,
//! further URLs are ignored, which makes truncation keep the first-seen
//! entries.

use std::collections::HashSet;

/// A duplicate-free set of URL strings that remembers first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    urls: Vec<String>,
    seen: HashSet<String>,
    cap: Option<usize>,
}

impl ResultSet {
    /// A set that never holds more than `cap` URLs.
    pub fn bounded(cap: usize) -> Self {
        Self {
            cap: Some(cap),
            ..Self::default()
        }
    }

    /// A set with no size limit.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Insert one URL. Returns `true` if it was new and fit under the cap.
    pub fn insert(&mut self, url: String) -> bool {
        if self.is_full() || self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.urls.push(url);
        true
    }

    /// Insert every URL in `urls`, returning how many were new.
    pub fn merge<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = 0;
        for url in urls {
            if self.is_full() {
                break;
            }
            if self.insert(url) {
                added += 1;
            }
        }
        added
    }

    /// Whether the cap has been reached. Always `false` when unbounded.
    pub fn is_full(&self) -> bool {
        self.cap.is_some_and(|cap| self.urls.len() >= cap)
    }

    /// Number of URLs held.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Consume the set, returning URLs in first-seen order.
    pub fn into_vec(self) -> Vec<String> {
        self.urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn merge_counts_only_new_urls() {
        let mut set = ResultSet::bounded(10);
        assert_eq!(set.merge(urls(&["a", "b", "a"])), 2);
        assert_eq!(set.merge(urls(&["b", "c"])), 1);
        assert_eq!(set.merge(urls(&["a", "b", "c"])), 0);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn cap_keeps_first_seen() {
        let mut set = ResultSet::bounded(3);
        let added = set.merge(urls(&["a", "b", "c", "d", "e"]));
        assert_eq!(added, 3);
        assert!(set.is_full());
        assert_eq!(set.into_vec(), urls(&["a", "b", "c"]));
    }

    #[test]
    fn full_set_rejects_inserts() {
        let mut set = ResultSet::bounded(1);
        assert!(set.insert("a".into()));
        assert!(!set.insert("b".into()));
        assert_eq!(set.into_vec(), urls(&["a"]));
    }

    #[test]
    fn exact_string_equality() {
        let mut set = ResultSet::unbounded();
        set.merge(urls(&["https://a.com", "https://a.com/", "HTTPS://A.COM"]));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn unbounded_never_full() {
        let mut set = ResultSet::unbounded();
        set.merge((0..1000).map(|i| format!("https://e{i}.com")));
        assert_eq!(set.len(), 1000);
        assert!(!set.is_full());
    }

    #[test]
    fn zero_cap_is_immediately_full() {
        let mut set = ResultSet::bounded(0);
        assert!(set.is_full());
        assert_eq!(set.merge(urls(&["a"])), 0);
        assert!(set.is_empty());
    }

    #[test]
    fn first_seen_order_is_kept() {
        let mut set = ResultSet::unbounded();
        set.merge(urls(&["z", "y", "x", "y"]));
        assert_eq!(set.into_vec(), urls(&["z", "y", "x"]));
    }
}
