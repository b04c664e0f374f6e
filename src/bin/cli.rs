//! Archive Crawler CLI
//!
//! Crawls the results archive and writes the deduplicated records to CSV.

use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;

use archive_crawler::{
    error::Result,
    models::Config,
    pipeline,
    storage::{CsvSink, RecordSink},
};

/// Marathon results archive crawler
#[derive(Parser, Debug)]
#[command(
    name = "archive-crawler",
    version,
    about = "Crawls the NYRR marathon results archive into a flat CSV"
)]
struct Cli {
    /// Output filename
    #[arg(short, long, default_value = "crawl.csv")]
    filename: PathBuf,

    /// Path to a TOML config file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_or_default(path),
        None => Config::default(),
    };
    config.validate()?;

    log::info!(
        "crawling {} results from {}",
        config.search.year,
        config.crawler.site_root
    );

    let started = Utc::now();
    let outcome = pipeline::run_crawl(&config).await?;

    let sink = CsvSink::new(&cli.filename);
    let summary = sink.write_records(&outcome.records).await?;
    log::info!("wrote {} results to {}", summary.record_count, summary.location);

    let elapsed = (Utc::now() - started).num_seconds();
    log::info!(
        "crawled {} dimensions over {} pages in {}s ({} duplicates dropped, {} dimensions cut short)",
        outcome.dimension_total,
        outcome.pages_fetched,
        elapsed,
        outcome.duplicates_dropped,
        outcome.parse_skips
    );

    Ok(())
}
