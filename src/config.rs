//! Configuration types for batch harvesting.
//!
//! Loaded from an optional TOML file; command-line flags override
//! individual fields afterwards.

use dork_search::{Backend, HarvestConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HarvestError, Result};

/// Top-level configuration for a harvesting run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pagination, concurrency and request settings.
    pub harvest: HarvestSettings,
    /// Which search backends are enabled.
    pub backends: BackendToggles,
    /// Where result artifacts are written.
    pub output: OutputConfig,
}

/// Harvest limits and pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestSettings {
    /// Maximum unique URLs gathered per backend for each query.
    pub max_results_per_query: usize,
    /// Offset step between successive pages.
    pub page_size: usize,
    /// Maximum page requests in flight across all backends.
    pub concurrency_limit: usize,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Pause between pages of one backend, in milliseconds.
    pub page_delay_ms: u64,
    /// Fixed User-Agent (None = random browser identity per backend).
    pub user_agent: Option<String>,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        let defaults = HarvestConfig::default();
        Self {
            max_results_per_query: defaults.max_results,
            page_size: defaults.page_size,
            concurrency_limit: defaults.concurrency_limit,
            timeout_seconds: defaults.timeout_seconds,
            page_delay_ms: defaults.page_delay_ms,
            user_agent: None,
        }
    }
}

/// Per-backend enable flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendToggles {
    /// Harvest from Bing.
    pub bing: bool,
    /// Harvest from DuckDuckGo.
    pub duckduckgo: bool,
    /// Harvest from Yahoo.
    pub yahoo: bool,
}

impl Default for BackendToggles {
    fn default() -> Self {
        Self {
            bing: true,
            duckduckgo: true,
            yahoo: true,
        }
    }
}

impl BackendToggles {
    /// Enabled backends in their canonical order.
    pub fn enabled(&self) -> Vec<Backend> {
        Backend::all()
            .iter()
            .copied()
            .filter(|b| self.is_enabled(*b))
            .collect()
    }

    /// Whether `backend` is enabled.
    pub fn is_enabled(&self, backend: Backend) -> bool {
        match backend {
            Backend::Bing => self.bing,
            Backend::DuckDuckGo => self.duckduckgo,
            Backend::Yahoo => self.yahoo,
        }
    }

    /// Enable or disable `backend`.
    pub fn set(&mut self, backend: Backend, enabled: bool) {
        match backend {
            Backend::Bing => self.bing = enabled,
            Backend::DuckDuckGo => self.duckduckgo = enabled,
            Backend::Yahoo => self.yahoo = enabled,
        }
    }
}

/// Output artifact settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory result files are written to.
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| HarvestError::Config(e.to_string()))
    }

    /// Build the engine configuration, validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if any limit is zero or no backend is enabled.
    pub fn to_harvest_config(&self) -> Result<HarvestConfig> {
        let config = HarvestConfig {
            backends: self.backends.enabled(),
            max_results: self.harvest.max_results_per_query,
            page_size: self.harvest.page_size,
            concurrency_limit: self.harvest.concurrency_limit,
            timeout_seconds: self.harvest.timeout_seconds,
            page_delay_ms: self.harvest.page_delay_ms,
            user_agent: self.harvest.user_agent.clone(),
        };
        config.validate()?;
        Ok(config)
    }
}
