//! The load phase: batches of transfers with a periodic mine trigger.

use crate::accounts::AccountRing;
use crate::client::Ledger;
use crate::error::BenchError;
use crate::types::RunTally;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub const MINE_INTERVAL: Duration = Duration::from_secs(2);
pub const TRANSFER_AMOUNT: u64 = 1;

/// Result of a mine trigger. Always logged, never escalated.
#[derive(Debug)]
pub enum MineOutcome {
    Mined,
    Failed(BenchError),
}

impl MineOutcome {
    async fn trigger<L: Ledger>(ledger: &L) -> Self {
        match ledger.mine().await {
            Ok(()) => Self::Mined,
            Err(error) => Self::Failed(error),
        }
    }

    fn log(&self, tx_count: u64) {
        match self {
            Self::Mined => info!("Mine triggered after {} transfers", tx_count),
            Self::Failed(error) => warn!("Mine trigger failed, continuing: {}", error),
        }
    }
}

/// Mutable state of one load run, owned by the loop.
#[derive(Debug)]
pub struct RunContext {
    started: Instant,
    next_mine: Instant,
    tx_count: u64,
    latencies: Vec<f64>,
    mine_attempts: u64,
}

impl RunContext {
    fn new(started: Instant) -> Self {
        Self {
            started,
            next_mine: started,
            tx_count: 0,
            latencies: Vec::new(),
            mine_attempts: 0,
        }
    }

    fn record(&mut self, latency: Duration) {
        self.latencies.push(latency.as_secs_f64());
        self.tx_count += 1;
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// What the load phase hands to the report once it ends normally.
#[derive(Debug, Clone)]
pub struct LoadSummary {
    pub tally: RunTally,
    pub latencies: Vec<f64>,
}

impl LoadSummary {
    pub fn avg_latency_seconds(&self) -> f64 {
        if self.latencies.is_empty() {
            0.0
        } else {
            self.latencies.iter().sum::<f64>() / self.latencies.len() as f64
        }
    }
}

pub struct LoadLoop<'a, L> {
    ledger: &'a L,
    ring: &'a AccountRing,
    duration: Duration,
    rate: u64,
    mine_interval: Duration,
}

impl<'a, L: Ledger> LoadLoop<'a, L> {
    pub fn new(ledger: &'a L, ring: &'a AccountRing, duration: Duration, rate: u64) -> Self {
        Self {
            ledger,
            ring,
            duration,
            rate,
            mine_interval: MINE_INTERVAL,
        }
    }

    /// Runs until `duration` has elapsed at the top of an iteration. A batch
    /// is never cut short, so the run may overshoot by one batch. Any
    /// transfer error ends the run and is returned as-is.
    pub async fn run(&self) -> Result<LoadSummary, BenchError> {
        let mut ctx = RunContext::new(Instant::now());
        info!(
            "Starting load: {} transfers per batch for {:?}",
            self.rate, self.duration
        );

        while ctx.elapsed() < self.duration {
            self.run_batch(&mut ctx).await?;

            let now = Instant::now();
            if now >= ctx.next_mine {
                ctx.mine_attempts += 1;
                MineOutcome::trigger(self.ledger).await.log(ctx.tx_count);
                ctx.next_mine = Instant::now() + self.mine_interval;
            }
        }

        let elapsed = ctx.elapsed();
        info!(
            "Load finished: {} transfers in {:.2}s, {} mine triggers",
            ctx.tx_count,
            elapsed.as_secs_f64(),
            ctx.mine_attempts
        );
        Ok(LoadSummary {
            tally: RunTally {
                tx_count: ctx.tx_count,
                elapsed_seconds: elapsed.as_secs_f64(),
            },
            latencies: ctx.latencies,
        })
    }

    async fn run_batch(&self, ctx: &mut RunContext) -> Result<(), BenchError> {
        for _ in 0..self.rate {
            let request = self.ring.transfer(ctx.tx_count, TRANSFER_AMOUNT);
            let latency = self.ledger.transfer(&request).await?;
            ctx.record(latency);
        }
        debug!("Batch done, {} transfers so far", ctx.tx_count);
        Ok(())
    }
}
