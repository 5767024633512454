//! Hyperlink extraction from search result pages.
//!
//! Every backend shares the same rule: collect each `<a href>` whose target
//! is an absolute `http`/`https` URL. Protocol-relative links (`//host/...`)
//! are promoted to `https:`. Engine-specific redirect wrappers are unwrapped
//! by the adapters with [`unwrap_query_param`] and [`unwrap_path_segment`].

use scraper::{Html, Selector};
use url::Url;

/// Collect every absolute link target in `html`, in document order.
///
/// Duplicates are kept; deduplication is the fetcher's job. Markup that
/// cannot be parsed into anything useful simply yields no links.
pub fn extract_links(html: &str) -> Vec<String> {
    let Ok(anchor_sel) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let links: Vec<String> = document
        .select(&anchor_sel)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(absolute_url)
        .collect();

    tracing::debug!(count = links.len(), "links extracted");
    links
}

/// Return `href` as an absolute URL string, or `None` if it is relative or
/// uses a scheme other than HTTP(S).
pub fn absolute_url(href: &str) -> Option<String> {
    let href = href.trim();
    let full = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };

    if !full.contains("://") {
        return None;
    }

    let parsed = Url::parse(&full).ok()?;
    matches!(parsed.scheme(), "http" | "https").then_some(full)
}

/// If `link` points at `host` with a path under `path_prefix`, return the
/// decoded value of query parameter `param`.
///
/// Used for redirectors such as `https://duckduckgo.com/l/?uddg=<target>`.
pub fn unwrap_query_param(link: &str, host: &str, path_prefix: &str, param: &str) -> Option<String> {
    let parsed = Url::parse(link).ok()?;
    if !host_matches(&parsed, host) || !parsed.path().starts_with(path_prefix) {
        return None;
    }
    parsed
        .query_pairs()
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())
        .and_then(|target| absolute_url(&target))
}

/// If `link` points at `host` and one of its path segments starts with
/// `marker` (e.g. `RU=`), return that segment's percent-decoded remainder.
///
/// Used for Yahoo's `https://r.search.yahoo.com/.../RU=<target>/RK=...` links.
pub fn unwrap_path_segment(link: &str, host: &str, marker: &str) -> Option<String> {
    let parsed = Url::parse(link).ok()?;
    if !host_matches(&parsed, host) {
        return None;
    }
    let encoded = parsed
        .path()
        .split('/')
        .find_map(|segment| segment.strip_prefix(marker))?;
    let decoded = urlencoding::decode(encoded).ok()?;
    absolute_url(&decoded)
}

fn host_matches(parsed: &Url, host: &str) -> bool {
    parsed
        .host_str()
        .is_some_and(|h| h == host || h.ends_with(&format!(".{host}")))
}
