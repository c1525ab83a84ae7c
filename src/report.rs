//! Report assembly and the three output artifacts.

use crate::error::BenchError;
use crate::load::LoadSummary;
use crate::types::{ChainSnapshot, Report, ResourceSamples, SummaryRow, REORG_NOTE};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const JSON_FILE: &str = "benchmark_report.json";
pub const CSV_FILE: &str = "benchmark_report.csv";
pub const MARKDOWN_FILE: &str = "benchmark_report.md";

impl Report {
    pub fn new(
        duration_seconds: u64,
        load: &LoadSummary,
        snapshot: &ChainSnapshot,
        docker_stats: ResourceSamples,
    ) -> Self {
        Self {
            duration_seconds,
            tx_count: load.tally.tx_count,
            tps: load.tally.tps(),
            avg_latency_seconds: load.avg_latency_seconds(),
            finalized_height: snapshot.finalized_height(),
            blocks_mined: snapshot.blocks_mined(),
            blocks_received: snapshot.blocks_received(),
            docker_stats,
            reorg_count: 0,
            notes: REORG_NOTE.to_string(),
        }
    }

    pub fn to_markdown(&self) -> String {
        format!(
            "# Benchmark Report\n\n\
             - Duration: {} seconds\n\
             - Transactions: {}\n\
             - TPS: {:.2}\n\
             - Avg latency: {:.4} s\n\
             - Finalized height: {}\n\
             - Blocks mined: {}\n\
             - Blocks received: {}\n\
             - Reorg count: 0 (not instrumented)\n",
            self.duration_seconds,
            self.tx_count,
            self.tps,
            self.avg_latency_seconds,
            display(&self.finalized_height),
            display(&self.blocks_mined),
            display(&self.blocks_received),
        )
    }

    pub fn to_csv(&self) -> Result<Vec<u8>, BenchError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(SummaryRow::from(self))?;
        writer
            .into_inner()
            .map_err(|e| BenchError::Io(e.into_error()))
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Writes the JSON, CSV and Markdown artifacts, overwriting existing files.
/// Returns the paths written, in that order.
pub fn write_report(report: &Report, output_dir: &Path) -> Result<Vec<PathBuf>, BenchError> {
    let json = serde_json::to_string_pretty(report)?;
    let csv = report.to_csv()?;
    let markdown = report.to_markdown();

    let artifacts: [(&str, &[u8]); 3] = [
        (JSON_FILE, json.as_bytes()),
        (CSV_FILE, &csv),
        (MARKDOWN_FILE, markdown.as_bytes()),
    ];

    let mut written = Vec::with_capacity(artifacts.len());
    for (name, contents) in artifacts {
        let path = output_dir.join(name);
        fs::write(&path, contents).map_err(|source| BenchError::Write {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }

    info!(
        "Report: {} transfers, {:.2} TPS, avg latency {:.4}s, saved to {}",
        report.tx_count,
        report.tps,
        report.avg_latency_seconds,
        output_dir.display()
    );
    Ok(written)
}
