//! Query list loading.

use std::path::Path;

use crate::error::Result;

/// Split `content` into queries: one per line, trimmed, blanks dropped.
pub fn parse_queries(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Read the query file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_queries(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let queries = parse_queries(&content);
    tracing::info!(path = %path.display(), count = queries.len(), "queries loaded");
    Ok(queries)
}
