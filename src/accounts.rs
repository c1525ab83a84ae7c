use crate::client::Ledger;
use crate::error::BenchError;
use crate::types::TransferRequest;
use tracing::info;

pub const RING_SIZE: usize = 10;
pub const SEED_AMOUNT: u64 = 100;

/// Fixed pool of synthetic accounts, indexed cyclically.
#[derive(Debug, Clone)]
pub struct AccountRing {
    accounts: Vec<String>,
}

impl Default for AccountRing {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountRing {
    pub fn new() -> Self {
        Self {
            accounts: (0..RING_SIZE).map(|i| format!("bench-{i}")).collect(),
        }
    }

    /// Transfer number `tx_index` goes from slot `tx_index` to the next slot.
    pub fn transfer(&self, tx_index: u64, amount: u64) -> TransferRequest {
        let len = self.accounts.len() as u64;
        TransferRequest {
            from: self.accounts[(tx_index % len) as usize].clone(),
            to: self.accounts[((tx_index + 1) % len) as usize].clone(),
            amount,
        }
    }

    /// Funds every account from `admin`. The first failure aborts seeding.
    pub async fn seed<L: Ledger>(&self, ledger: &L, admin: &str) -> Result<(), BenchError> {
        for account in &self.accounts {
            let request = TransferRequest {
                from: admin.to_string(),
                to: account.clone(),
                amount: SEED_AMOUNT,
            };
            ledger.transfer(&request).await?;
        }
        info!(
            "Seeded {} accounts with {} units each from {}",
            self.accounts.len(),
            SEED_AMOUNT,
            admin
        );
        Ok(())
    }
}
