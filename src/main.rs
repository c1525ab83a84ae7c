use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod accounts;
mod client;
mod config;
mod error;
mod load;
mod report;
mod resources;
mod runner;
#[cfg(test)]
mod testing;
mod types;

use crate::client::HttpLedger;
use crate::config::{BenchConfig, Cli};
use crate::error::BenchError;
use crate::resources::DockerStats;

#[tokio::main]
async fn main() -> Result<(), BenchError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let result = run(cli).await;
    if let Err(e) = &result {
        error!("Benchmark aborted, no report written: {}", e);
    }
    result
}

async fn run(cli: Cli) -> Result<(), BenchError> {
    let config = BenchConfig::resolve(cli)?;
    let ledger = HttpLedger::new(&config)?;

    let written = runner::run_benchmark(&config, &ledger, &DockerStats::default()).await?;
    for path in written {
        info!("Results saved to: {}", path.display());
    }
    Ok(())
}
