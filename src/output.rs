//! Per-query result artifacts.
//!
//! Each query's combined URL set is written to
//! `search_results_<query>.txt`, where spaces and path separators in the
//! query become underscores. Files are written to a temporary sibling and
//! renamed into place, so an artifact is either complete or absent.

use std::path::{Path, PathBuf};

use dork_search::HarvestOutcome;

use crate::error::Result;

/// Receives each query's outcome exactly once.
pub trait ResultSink {
    /// Persist `outcome`, returning where it was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the outcome cannot be persisted.
    fn write(&self, outcome: &HarvestOutcome) -> Result<PathBuf>;
}

/// Deterministic artifact file name for `query`.
pub fn artifact_file_name(query: &str) -> String {
    let stem: String = query
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("search_results_{stem}.txt")
}

/// Render the artifact body: a header line, then one URL per line.
pub fn render(outcome: &HarvestOutcome) -> String {
    let mut body = format!(
        "Total {} unique URLs found for '{}' from all search engines:\n",
        outcome.len(),
        outcome.query
    );
    for url in &outcome.urls {
        body.push_str(url);
        body.push('\n');
    }
    body
}

/// Writes artifacts as text files into one directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    directory: PathBuf,
}

impl FileSink {
    /// Write artifacts under `directory`, creating it on first write.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The path the artifact for `query` is written to.
    pub fn path_for(&self, query: &str) -> PathBuf {
        self.directory.join(artifact_file_name(query))
    }
}

impl ResultSink for FileSink {
    fn write(&self, outcome: &HarvestOutcome) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.directory)?;
        let path = self.path_for(&outcome.query);
        write_atomically(&path, &render(outcome))?;
        tracing::debug!(path = %path.display(), urls = outcome.len(), "artifact written");
        Ok(path)
    }
}

fn write_atomically(path: &Path, content: &str) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));
    std::fs::write(&tmp, content)?;
    std::fs::rename(&tmp, path).inspect_err(|_| {
        let _ = std::fs::remove_file(&tmp);
    })
}
