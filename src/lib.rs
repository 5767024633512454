//! # dork-harvester
//!
//! Batch URL harvesting for lists of search queries.
//!
//! Reads queries from a text file, harvests each one from every enabled
//! search backend through [`dork_search`], and writes one result file per
//! query.
//!
//! ## Modules
//!
//! - [`config`]: TOML configuration with CLI overrides
//! - [`queries`]: query file loading
//! - [`batch`]: sequential per-query harvesting with cancellation
//! - [`output`]: result artifacts and the [`ResultSink`] seam
//! - [`progress`]: indicatif progress display

pub mod batch;
pub mod config;
pub mod error;
pub mod output;
pub mod progress;
pub mod queries;

pub use batch::{BatchCallback, BatchEvent, BatchSummary, QueryBatchRunner};
pub use config::AppConfig;
pub use error::{HarvestError, Result};
pub use output::{FileSink, ResultSink};
pub use progress::HarvestProgress;
pub use queries::{load_queries, parse_queries};
