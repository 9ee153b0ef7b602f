//! CLI for the plugin index.
//!
//! Scrapes GitHub for repositories publishing shelter plugins and prints the
//! resulting catalog as JSON.

use clap::Parser;
use plugin_index::{ExtractionSummary, IndexRun, Indexer, IndexerConfig, RunnerError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Plugin Index - Build a catalog of third-party shelter plugins.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN")]
    token: String,

    /// TOML file overriding the API base URI or user agent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the catalog to this file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

/// Errors surfaced by the CLI.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Scrape failures.
    #[error(transparent)]
    Runner(#[from] RunnerError),

    /// Failed to serialize or write the catalog.
    #[error("{0}")]
    Output(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::from(0)
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Output goes to stderr so stdout carries only the catalog JSON.
/// Log level is read from `RUST_LOG`, defaulting to "info".
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<ExtractionSummary, CliError> {
    let mut config = IndexerConfig::new(args.token);
    if let Some(path) = &args.config {
        config = config
            .with_overrides_file(path)
            .map_err(RunnerError::from)?;
    }

    let indexer = Indexer::new(config)?;
    let IndexRun { catalog, summary } = indexer.run().await?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&catalog)
    } else {
        serde_json::to_string(&catalog)
    }
    .map_err(|e| CliError::Output(format!("Failed to serialize catalog: {e}")))?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json).map_err(|e| {
                CliError::Output(format!("Failed to write '{}': {e}", path.display()))
            })?;
            info!(path = %path.display(), "Catalog written");
        }
        None => println!("{json}"),
    }

    Ok(summary)
}

/// Prints the final run summary to stderr.
fn print_summary(summary: &ExtractionSummary) {
    eprintln!("\nSummary:");
    eprintln!("  Repositories scanned: {}", summary.repositories_scanned);
    eprintln!("  Repositories accepted: {}", summary.repositories_accepted);
    eprintln!("  Plugins found: {}", summary.plugins_found);

    for (reason, count) in &summary.rejections {
        eprintln!("  Rejected ({reason}): {count}");
    }

    if summary.more_results_available {
        eprintln!("  More results available (not fetched)");
    }
}
