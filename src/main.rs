mod cli;
mod config;
mod diagnostics;
mod error;
mod migrate;
mod model;
mod providers;
mod report;
mod util;

use anyhow::{Context, Result};
use tracing::{info, warn};

use migrate::Migrator;
use providers::asana::AsanaWriter;
use providers::trello::TrelloReader;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = cli::parse_args(&args)?;
    if opts.help {
        cli::print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = config::load_config()?;
    let missing = config.missing_credentials();
    if !missing.is_empty() {
        warn!(missing = ?missing, "Credentials not set; requests will likely be rejected");
    }

    let client = providers::build_client(config.http.timeout())
        .context("Failed to build HTTP client")?;
    let reader = TrelloReader::new(&config.trello, client.clone());
    let writer = AsanaWriter::new(&config.asana, client);

    info!(workspace = %config.asana.workspace_id, "Starting migration");
    let report = Migrator::new(&reader, &writer).run().await;

    if let Some(path) = &opts.report {
        report::append_diagnostics(path, &report.diagnostics)?;
        info!(path = %path.display(), entries = report.diagnostics.len(), "Report written");
    }

    Ok(())
}
