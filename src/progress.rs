//! Terminal progress display for batch harvesting.
//!
//! Renders one indicatif bar per backend for the query currently being
//! harvested, plus a line per query as it starts and is saved. Driven
//! entirely by [`ProgressEvent`] and [`BatchEvent`] callbacks, so the
//! harvesting code never touches the terminal.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dork_search::{Backend, ProgressCallback, ProgressEvent};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::batch::{BatchCallback, BatchEvent};

const BAR_TEMPLATE: &str = "  {prefix:<11} [{bar:30}] {pos}/{len} URLs {msg}";

/// Per-backend progress bars for the running query.
pub struct HarvestProgress {
    multi: MultiProgress,
    bars: Mutex<HashMap<Backend, ProgressBar>>,
}

impl HarvestProgress {
    /// Display drawn to stdout.
    pub fn stdout() -> Arc<Self> {
        Self::with_target(ProgressDrawTarget::stdout())
    }

    /// Display that tracks state without drawing anything.
    pub fn hidden() -> Arc<Self> {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Arc<Self> {
        Arc::new(Self {
            multi: MultiProgress::with_draw_target(target),
            bars: Mutex::new(HashMap::new()),
        })
    }

    /// Callback feeding engine progress into this display.
    pub fn progress_callback(self: &Arc<Self>) -> ProgressCallback {
        let display = Arc::clone(self);
        Arc::new(move |event| display.on_progress(event))
    }

    /// Callback feeding batch events into this display.
    pub fn batch_callback(self: &Arc<Self>) -> BatchCallback {
        let display = Arc::clone(self);
        Box::new(move |event| display.on_batch(event))
    }

    /// Current bar position for `backend`, if it has a bar.
    pub fn position(&self, backend: Backend) -> Option<u64> {
        let bars = self.bars.lock().ok()?;
        bars.get(&backend).map(ProgressBar::position)
    }

    /// Whether the bar for `backend` has finished.
    pub fn is_finished(&self, backend: Backend) -> bool {
        let Ok(bars) = self.bars.lock() else {
            return false;
        };
        bars.get(&backend).is_some_and(ProgressBar::is_finished)
    }

    fn on_progress(&self, event: ProgressEvent) {
        let Ok(mut bars) = self.bars.lock() else {
            return;
        };
        match event {
            ProgressEvent::FetchStarted { backend, target } => {
                let pb = self.multi.add(ProgressBar::new(target as u64));
                if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
                    pb.set_style(style.progress_chars("=> "));
                }
                pb.set_prefix(backend.to_string());
                if let Some(old) = bars.insert(backend, pb) {
                    old.finish_and_clear();
                }
            }
            ProgressEvent::PageMerged { backend, total, .. } => {
                if let Some(pb) = bars.get(&backend) {
                    pb.set_position(total as u64);
                }
            }
            ProgressEvent::FetchFinished {
                backend,
                stop,
                total,
            } => {
                if let Some(pb) = bars.get(&backend) {
                    pb.set_position(total as u64);
                    pb.finish_with_message(format!("({stop})"));
                }
            }
        }
    }

    fn on_batch(&self, event: BatchEvent) {
        match event {
            BatchEvent::QueryStarted {
                index,
                total,
                query,
            } => {
                self.clear_bars();
                let _ = self.multi.println(format!(
                    "[{}/{}] Searching for '{query}'...",
                    index + 1,
                    total
                ));
            }
            BatchEvent::QuerySaved { query, path, urls } => {
                let _ = self.multi.println(format!(
                    "Results for '{query}' ({urls} unique URLs) saved in {}",
                    path.display()
                ));
            }
            BatchEvent::QueryFailed { query, message } => {
                let _ = self
                    .multi
                    .println(format!("No results saved for '{query}': {message}"));
            }
        }
    }

    /// Remove every bar from the display.
    pub fn clear_bars(&self) {
        let Ok(mut bars) = self.bars.lock() else {
            return;
        };
        for (_, pb) in bars.drain() {
            pb.finish_and_clear();
            self.multi.remove(&pb);
        }
    }
}
