use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const REORG_NOTE: &str = "Reorg count requires chain fork instrumentation.";

/// Settings read from `BENCH_*` environment variables.
#[derive(Deserialize, Debug)]
pub struct EnvConfig {
    #[serde(default = "default_admin_account")]
    pub admin_account: String,
    #[serde(default = "default_containers")]
    pub containers: Vec<String>,
}

fn default_admin_account() -> String {
    "admin".to_string()
}

fn default_containers() -> Vec<String> {
    [
        "hikmalayer-bootnode",
        "hikmalayer-validator1",
        "hikmalayer-validator2",
        "hikmalayer-validator3",
        "hikmalayer-validator4",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub amount: u64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunTally {
    pub tx_count: u64,
    pub elapsed_seconds: f64,
}

impl RunTally {
    pub fn tps(&self) -> f64 {
        if self.elapsed_seconds > 0.0 {
            self.tx_count as f64 / self.elapsed_seconds
        } else {
            0.0
        }
    }
}

/// Raw end-of-run snapshots from the node. Only a few fields are projected
/// into the report, the rest is kept as-is.
#[derive(Debug, Clone, Default)]
pub struct ChainSnapshot {
    pub stats: Value,
    pub metrics: Value,
}

impl ChainSnapshot {
    pub fn finalized_height(&self) -> Value {
        field(&self.stats, "finalized_height")
    }

    pub fn blocks_mined(&self) -> Value {
        field(&self.metrics, "blocks_mined")
    }

    pub fn blocks_received(&self) -> Value {
        field(&self.metrics, "blocks_received")
    }
}

fn field(object: &Value, key: &str) -> Value {
    object.get(key).cloned().unwrap_or(Value::Null)
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResourceSample {
    pub cpu: String,
    pub mem: String,
}

pub type ResourceSamples = BTreeMap<String, ResourceSample>;

#[derive(Serialize, Debug, Clone)]
pub struct Report {
    pub duration_seconds: u64,
    pub tx_count: u64,
    pub tps: f64,
    pub avg_latency_seconds: f64,
    pub finalized_height: Value,
    pub blocks_mined: Value,
    pub blocks_received: Value,
    pub docker_stats: ResourceSamples,
    pub reorg_count: u64,
    pub notes: String,
}

#[derive(Serialize)]
pub struct SummaryRow {
    pub duration_seconds: u64,
    pub tx_count: u64,
    pub tps: f64,
    pub avg_latency_seconds: f64,
}

impl From<&Report> for SummaryRow {
    fn from(report: &Report) -> Self {
        Self {
            duration_seconds: report.duration_seconds,
            tx_count: report.tx_count,
            tps: report.tps,
            avg_latency_seconds: report.avg_latency_seconds,
        }
    }
}
