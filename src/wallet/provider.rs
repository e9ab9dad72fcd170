//! Wallet Providers
//!
//! A provider is the host-injected wallet extension (Keplr in a browser).
//! The session only ever asks it two things: enable a chain, then list the
//! accounts for that chain.

use async_trait::async_trait;
use std::time::Duration;

use super::error::{WalletError, WalletResult};

/// Account exposed by a wallet for a chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub address: String,
}

impl Account {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// Common trait for wallet extensions
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Name shown in logs
    fn name(&self) -> &str;

    /// Ask the user to allow access to a chain
    async fn enable(&self, chain_id: &str) -> WalletResult<()>;

    /// Accounts of the offline signer for a chain
    async fn accounts(&self, chain_id: &str) -> WalletResult<Vec<Account>>;
}

/// Wallet that answers with a fixed address
///
/// Stands in for the extension outside a browser. It can be told to reject
/// the request or to take a while answering.
#[derive(Debug, Clone)]
pub struct SimulatedWallet {
    address: Option<String>,
    rejection: Option<String>,
    latency: Option<Duration>,
}

impl SimulatedWallet {
    /// Wallet holding a single account
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            rejection: None,
            latency: None,
        }
    }

    /// Wallet with no accounts at all
    pub fn without_accounts() -> Self {
        Self {
            address: None,
            rejection: None,
            latency: None,
        }
    }

    /// Builder method: refuse `enable` with the given reason
    pub fn rejecting(mut self, reason: impl Into<String>) -> Self {
        self.rejection = Some(reason.into());
        self
    }

    /// Builder method: delay every answer
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn wait(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl WalletProvider for SimulatedWallet {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn enable(&self, chain_id: &str) -> WalletResult<()> {
        self.wait().await;

        match &self.rejection {
            Some(reason) => Err(WalletError::Rejected(reason.clone())),
            None => {
                tracing::debug!(chain_id = %chain_id, "Simulated wallet enabled");
                Ok(())
            }
        }
    }

    async fn accounts(&self, _chain_id: &str) -> WalletResult<Vec<Account>> {
        Ok(self.address.iter().map(Account::new).collect())
    }
}
