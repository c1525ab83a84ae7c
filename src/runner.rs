use crate::accounts::AccountRing;
use crate::client::Ledger;
use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::load::LoadLoop;
use crate::report::write_report;
use crate::resources::DockerStats;
use crate::types::{ChainSnapshot, Report};
use std::path::PathBuf;
use tracing::info;

// Seed, load, collect, report. Any error before the report is written
// aborts the run and nothing is persisted.
pub async fn run_benchmark<L: Ledger>(
    config: &BenchConfig,
    ledger: &L,
    sampler: &DockerStats,
) -> Result<Vec<PathBuf>, BenchError> {
    info!("Starting ledger benchmark:");
    info!("  Endpoint: {}", config.base_url);
    info!("  Duration: {:?}", config.duration);
    info!("  Transfers per batch: {}", config.rate);
    info!("  Output: {}", config.output_dir.display());

    let ring = AccountRing::new();
    ring.seed(ledger, &config.admin_account).await?;

    let load = LoadLoop::new(ledger, &ring, config.duration, config.rate)
        .run()
        .await?;

    let snapshot = ChainSnapshot {
        stats: ledger.stats().await?,
        metrics: ledger.metrics().await?,
    };
    let docker_stats = sampler.sample(&config.containers).await;

    let report = Report::new(config.duration.as_secs(), &load, &snapshot, docker_stats);
    write_report(&report, &config.output_dir)
}
