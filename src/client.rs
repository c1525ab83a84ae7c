//! HTTP access to the ledger node under test.

use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::types::TransferRequest;
use reqwest::Client;
use serde_json::{json, Value};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// The ledger operations the harness depends on.
pub trait Ledger {
    /// Sends one transfer and returns its round-trip latency.
    fn transfer(
        &self,
        request: &TransferRequest,
    ) -> impl Future<Output = Result<Duration, BenchError>>;

    fn mine(&self) -> impl Future<Output = Result<(), BenchError>>;

    fn stats(&self) -> impl Future<Output = Result<Value, BenchError>>;

    fn metrics(&self) -> impl Future<Output = Result<Value, BenchError>>;
}

pub struct HttpLedger {
    client: Client,
    transfer_url: String,
    mine_url: String,
    stats_url: String,
    metrics_url: String,
}

impl HttpLedger {
    pub fn new(config: &BenchConfig) -> Result<Self, BenchError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BenchError::http(&config.base_url, e))?;
        Ok(Self {
            client,
            transfer_url: config.endpoint("/tokens/transfer"),
            mine_url: config.endpoint("/mine"),
            stats_url: config.endpoint("/blockchain/stats"),
            metrics_url: config.endpoint("/metrics"),
        })
    }

    async fn post(&self, url: &str, body: &impl serde::Serialize) -> Result<(), BenchError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| BenchError::http(url, e))?;
        // The body is drained so the latency covers the full response.
        response
            .bytes()
            .await
            .map_err(|e| BenchError::http(url, e))?;
        Ok(())
    }

    async fn get_json(&self, url: &str) -> Result<Value, BenchError> {
        self.client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| BenchError::http(url, e))?
            .json::<Value>()
            .await
            .map_err(|e| BenchError::http(url, e))
    }
}

impl Ledger for HttpLedger {
    async fn transfer(&self, request: &TransferRequest) -> Result<Duration, BenchError> {
        let started = Instant::now();
        self.post(&self.transfer_url, request).await?;
        Ok(started.elapsed())
    }

    async fn mine(&self) -> Result<(), BenchError> {
        self.post(&self.mine_url, &json!({})).await
    }

    async fn stats(&self) -> Result<Value, BenchError> {
        debug!("Fetching chain stats from {}", self.stats_url);
        self.get_json(&self.stats_url).await
    }

    async fn metrics(&self) -> Result<Value, BenchError> {
        debug!("Fetching node metrics from {}", self.metrics_url);
        self.get_json(&self.metrics_url).await
    }
}
