//! UDA-Q CLI
//!
//! Terminal dashboard for the data-quality analysis service: upload a dataset,
//! follow the analysis job, read the report and fetch the cleaned file.

mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "udaq")]
#[command(about = "UDA-Q data quality evaluator CLI", long_about = None)]
struct Cli {
    /// Analysis service origin, the API lives under /api
    /// [default: $UDAQ_BASE_URL or http://localhost:8000]
    #[arg(long)]
    base_url: Option<String>,

    /// Delay between job status polls, in milliseconds
    /// [default: $UDAQ_POLL_INTERVAL_MS or 2000]
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr so they never interleave with the dashboard
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "udaq_cli=info,udaq_tracker=warn,udaq_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_args(cli.base_url, cli.poll_interval_ms)?;

    handle_command(cli.command, &config).await
}
