//! In-memory ledger used by unit tests.

use crate::client::Ledger;
use crate::error::BenchError;
use crate::types::TransferRequest;
use serde_json::Value;
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Default)]
pub struct FakeLedger {
    transfer_latency: Duration,
    fail_transfer_at: Option<usize>,
    fail_mine: bool,
    stats: Value,
    metrics: Value,
    transfers: Mutex<Vec<TransferRequest>>,
    transfer_attempts: Mutex<usize>,
    mines: Mutex<Vec<Instant>>,
}

impl FakeLedger {
    /// Every transfer sleeps for `latency` on the tokio clock.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.transfer_latency = latency;
        self
    }

    /// The transfer attempt with zero-based index `index` fails.
    pub fn fail_transfer_at(mut self, index: usize) -> Self {
        self.fail_transfer_at = Some(index);
        self
    }

    pub fn failing_mine(mut self) -> Self {
        self.fail_mine = true;
        self
    }

    pub fn with_snapshot(mut self, stats: Value, metrics: Value) -> Self {
        self.stats = stats;
        self.metrics = metrics;
        self
    }

    pub fn transfers(&self) -> Vec<TransferRequest> {
        self.transfers.lock().unwrap().clone()
    }

    pub fn mines(&self) -> Vec<Instant> {
        self.mines.lock().unwrap().clone()
    }
}

impl Ledger for FakeLedger {
    async fn transfer(&self, request: &TransferRequest) -> Result<Duration, BenchError> {
        let attempt = {
            let mut attempts = self.transfer_attempts.lock().unwrap();
            *attempts += 1;
            *attempts - 1
        };
        if self.fail_transfer_at == Some(attempt) {
            return Err(BenchError::Io(io::Error::other("transfer rejected")));
        }
        tokio::time::sleep(self.transfer_latency).await;
        self.transfers.lock().unwrap().push(request.clone());
        Ok(self.transfer_latency)
    }

    async fn mine(&self) -> Result<(), BenchError> {
        self.mines.lock().unwrap().push(Instant::now());
        if self.fail_mine {
            return Err(BenchError::Io(io::Error::other("mining unavailable")));
        }
        Ok(())
    }

    async fn stats(&self) -> Result<Value, BenchError> {
        Ok(self.stats.clone())
    }

    async fn metrics(&self) -> Result<Value, BenchError> {
        Ok(self.metrics.clone())
    }
}
