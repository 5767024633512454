//! CLI binary for dork-harvester.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use dork_harvester::{
    load_queries, AppConfig, FileSink, HarvestError, HarvestProgress, QueryBatchRunner,
};
use dork_search::{Backend, HttpTransport, MultiBackendHarvester};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "dork_harvester=info,dork_search=warn";

/// Harvest URLs for a list of search queries from several search engines.
#[derive(Parser)]
#[command(name = "dork-harvester", version, about)]
struct Cli {
    /// Text file with one search query per line (prompted for if omitted).
    queries: Option<PathBuf>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum unique URLs gathered per backend for each query.
    #[arg(long)]
    max_results: Option<usize>,

    /// Offset step between result pages.
    #[arg(long)]
    page_size: Option<usize>,

    /// Maximum page requests in flight at once.
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Pause between pages of one backend, in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Directory result files are written to.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip a backend (bing, duckduckgo, yahoo). Repeatable.
    #[arg(long, value_name = "BACKEND")]
    disable: Vec<Backend>,

    /// Send this User-Agent instead of a random browser one.
    #[arg(long)]
    user_agent: Option<String>,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        let harvest = &mut config.harvest;
        if let Some(n) = self.max_results {
            harvest.max_results_per_query = n;
        }
        if let Some(n) = self.page_size {
            harvest.page_size = n;
        }
        if let Some(n) = self.concurrency {
            harvest.concurrency_limit = n;
        }
        if let Some(secs) = self.timeout {
            harvest.timeout_seconds = secs;
        }
        if let Some(ms) = self.delay_ms {
            harvest.page_delay_ms = ms;
        }
        if let Some(ref ua) = self.user_agent {
            harvest.user_agent = Some(ua.clone());
        }
        if let Some(ref dir) = self.output_dir {
            config.output.directory = dir.clone();
        }
        for backend in &self.disable {
            config.backends.set(*backend, false);
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match init_tracing(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("An unexpected error occurred: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if matches!(e.downcast_ref::<HarvestError>(), Some(HarvestError::Cancelled)) => {
            println!("\nSearch process interrupted by user.");
            ExitCode::from(130)
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "harvest aborted");
            eprintln!("An unexpected error occurred: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr (or `log_file`); stdout is left to the progress display.
fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("invalid log file path: {}", path.display()))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    Ok(Some(guard))
}

fn prompt_for_path() -> anyhow::Result<PathBuf> {
    print!("Enter the path to the file containing search queries: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        anyhow::bail!("no query file given");
    }
    Ok(PathBuf::from(trimmed))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match cli.config {
        Some(ref path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    cli.apply_overrides(&mut config);
    let harvest_config = config.to_harvest_config()?;

    let query_path = match cli.queries {
        Some(path) => path,
        None => prompt_for_path()?,
    };
    let queries = load_queries(&query_path)?;
    if queries.is_empty() {
        println!("No queries found in {}", query_path.display());
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, stopping...");
            cancel_clone.cancel();
        }
    });

    info!(
        queries = queries.len(),
        backends = ?harvest_config.backends,
        max_results = harvest_config.max_results,
        "starting batch"
    );

    let display = HarvestProgress::stdout();
    let transport = Arc::new(HttpTransport::new(&harvest_config)?);
    let harvester = MultiBackendHarvester::new(harvest_config, transport)?
        .with_progress(display.progress_callback());
    let runner = QueryBatchRunner::new(harvester, FileSink::new(&config.output.directory))
        .with_callback(display.batch_callback());

    let summary = runner.run(&queries, &cancel).await;
    display.clear_bars();

    if summary.cancelled {
        return Err(HarvestError::Cancelled.into());
    }

    info!(?summary, "batch finished");
    println!(
        "\nDone: {} of {} queries saved, {} unique URLs in total.",
        summary.written,
        queries.len(),
        summary.total_urls
    );
    Ok(())
}
