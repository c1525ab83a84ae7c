use crate::error::BenchError;
use crate::types::EnvConfig;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser, Debug)]
#[command(name = "ledger-bench")]
#[command(about = "Load testing tool for ledger nodes over HTTP")]
pub struct Cli {
    /// Base URL of the ledger node, e.g. http://localhost:3000
    #[arg(long)]
    pub base_url: String,

    /// Load phase duration in seconds
    #[arg(long, default_value = "600")]
    pub duration: u64,

    /// Transfers issued per loop iteration
    #[arg(long, default_value = "50")]
    pub rate: u64,

    #[arg(long, default_value = "bench/results")]
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub base_url: String,
    pub duration: Duration,
    pub rate: u64,
    pub output_dir: PathBuf,
    pub admin_account: String,
    pub containers: Vec<String>,
    pub request_timeout: Duration,
}

impl BenchConfig {
    /// Resolves CLI flags and `BENCH_*` variables, creating the output
    /// directory on the way.
    pub fn resolve(cli: Cli) -> Result<Self, BenchError> {
        let env = envy::prefixed("BENCH_").from_env::<EnvConfig>()?;
        Self::from_parts(cli, env)
    }

    pub fn from_parts(cli: Cli, env: EnvConfig) -> Result<Self, BenchError> {
        let base_url = cli.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(BenchError::Config("--base-url must not be empty".into()));
        }
        if env.admin_account.is_empty() {
            return Err(BenchError::Config(
                "BENCH_ADMIN_ACCOUNT must not be empty".into(),
            ));
        }

        fs::create_dir_all(&cli.output)?;
        debug!("Output directory ready: {}", cli.output.display());

        Ok(Self {
            base_url,
            duration: Duration::from_secs(cli.duration),
            rate: cli.rate,
            output_dir: cli.output,
            admin_account: env.admin_account,
            containers: env
                .containers
                .into_iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
            request_timeout: REQUEST_TIMEOUT,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> EnvConfig {
        EnvConfig {
            admin_account: "admin".into(),
            containers: vec!["node-a".into(), " ".into()],
        }
    }

    #[test]
    fn defaults_match_documented_values() {
        let cli = Cli::try_parse_from(["ledger-bench", "--base-url", "http://node:3000"]).unwrap();
        assert_eq!(cli.duration, 600);
        assert_eq!(cli.rate, 50);
        assert_eq!(cli.output, PathBuf::from("bench/results"));
    }

    #[test]
    fn base_url_is_required() {
        assert!(Cli::try_parse_from(["ledger-bench"]).is_err());
    }

    #[test]
    fn negative_rate_is_rejected() {
        let parsed = Cli::try_parse_from([
            "ledger-bench",
            "--base-url",
            "http://node",
            "--rate",
            "-1",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn empty_base_url_fails_before_anything_else() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("never-created");
        let cli = Cli {
            base_url: "  ".into(),
            duration: 1,
            rate: 1,
            output: output.clone(),
        };
        let err = BenchConfig::from_parts(cli, env()).unwrap_err();
        assert!(matches!(err, BenchError::Config(_)));
        assert!(!output.exists());
    }

    #[test]
    fn output_directory_is_created_idempotently() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested/results");
        for _ in 0..2 {
            let cli = Cli {
                base_url: "http://node:3000/".into(),
                duration: 4,
                rate: 3,
                output: output.clone(),
            };
            let config = BenchConfig::from_parts(cli, env()).unwrap();
            assert_eq!(config.base_url, "http://node:3000");
            assert_eq!(config.endpoint("/mine"), "http://node:3000/mine");
            assert_eq!(config.containers, vec!["node-a".to_string()]);
        }
        assert!(output.is_dir());
    }
}
