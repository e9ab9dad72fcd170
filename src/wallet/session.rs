//! Wallet Session
//!
//! Tracks which address, if any, is connected. The address is mirrored to a
//! single key of the injected [`KeyValueStore`] so a later `restore` picks
//! it up again.
//!
//! ```text
//!                connect (provider ok)
//!   Disconnected ─────────────────────▶ Connected
//!        ▲                                  │
//!        └──────────── disconnect ──────────┘
//! ```
//!
//! While a `connect` is waiting on the provider a second one is refused.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use super::error::{WalletError, WalletResult};
use super::provider::WalletProvider;
use super::storage::KeyValueStore;
use crate::rally::Token;

/// Chain the session asks the provider for by default
pub const DEFAULT_CHAIN_ID: &str = "neutron-1";

/// Storage key holding the connected address
pub const DEFAULT_STORAGE_KEY: &str = "walletAddress";

/// Session settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub chain_id: String,
    pub storage_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Token amount held by the connected wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub token: Token,
    pub amount: f64,
}

/// Balances shown while connected; there is no chain query behind them
pub fn simulated_balances() -> Vec<Balance> {
    Token::supported()
        .iter()
        .map(|token| Balance {
            token: token.clone(),
            amount: match token {
                Token::Ntrn => 125.45,
                Token::TAtom => 3.72,
                Token::Usdc => 250.0,
                Token::Other(_) => 0.0,
            },
        })
        .collect()
}

/// Every supported token at zero
pub fn zero_balances() -> Vec<Balance> {
    Token::supported()
        .iter()
        .map(|token| Balance {
            token: token.clone(),
            amount: 0.0,
        })
        .collect()
}

/// Observable session state
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    /// Connected address
    pub address: Option<String>,
    pub balances: Vec<Balance>,
    /// A connect call is waiting on the provider
    pub connecting: bool,
}

impl SessionStatus {
    fn disconnected() -> Self {
        Self {
            address: None,
            balances: zero_balances(),
            connecting: false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }
}

/// Connected-wallet state for one browser tab or CLI profile
pub struct WalletSession {
    provider: Option<Arc<dyn WalletProvider>>,
    storage: Arc<dyn KeyValueStore>,
    config: SessionConfig,
    in_flight: AtomicBool,
    status: watch::Sender<SessionStatus>,
}

impl WalletSession {
    /// Create a disconnected session
    ///
    /// `provider` is `None` when no wallet extension is installed.
    pub fn new(
        provider: Option<Arc<dyn WalletProvider>>,
        storage: Arc<dyn KeyValueStore>,
        config: SessionConfig,
    ) -> Self {
        let (status, _) = watch::channel(SessionStatus::disconnected());
        Self {
            provider,
            storage,
            config,
            in_flight: AtomicBool::new(false),
            status,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current state
    pub fn status(&self) -> SessionStatus {
        self.status.borrow().clone()
    }

    /// Connected address, if any
    pub fn address(&self) -> Option<String> {
        self.status.borrow().address.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.status.borrow().is_connected()
    }

    /// Observe state changes
    pub fn watch(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// Pick up a previously persisted address
    ///
    /// Call once when the session is created. Returns the restored address.
    pub fn restore(&self) -> WalletResult<Option<String>> {
        let saved = self
            .storage
            .get(&self.config.storage_key)?
            .filter(|address| !address.is_empty());

        if let Some(address) = &saved {
            tracing::info!(address = %address, "Wallet session restored");
            self.status.send_modify(|status| {
                status.address = Some(address.clone());
                status.balances = simulated_balances();
            });
        }

        Ok(saved)
    }

    /// Connect through the wallet provider
    ///
    /// On any failure the session is left as it was.
    pub async fn connect(&self) -> WalletResult<String> {
        let Some(provider) = self.provider.clone() else {
            tracing::warn!("Wallet connect requested but no extension is installed");
            return Err(WalletError::ExtensionMissing);
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(WalletError::ConnectInProgress);
        }
        let _guard = InFlight(self);
        self.status.send_modify(|status| status.connecting = true);

        let address = match self.request_address(provider.as_ref()).await {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!(provider = provider.name(), error = %e, "Wallet connect failed");
                return Err(e);
            }
        };

        self.storage.set(&self.config.storage_key, &address)?;
        self.status.send_modify(|status| {
            status.address = Some(address.clone());
            status.balances = simulated_balances();
        });

        tracing::info!(
            provider = provider.name(),
            chain_id = %self.config.chain_id,
            address = %address,
            "Wallet connected"
        );
        Ok(address)
    }

    /// Forget the connected address
    ///
    /// The in-memory session is always cleared; a storage failure is reported
    /// afterwards and leaves the persisted address behind.
    pub fn disconnect(&self) -> WalletResult<()> {
        let previous = self.address();
        self.status.send_modify(|status| {
            status.address = None;
            status.balances = zero_balances();
        });

        if let Some(address) = previous {
            tracing::info!(address = %address, "Wallet disconnected");
        }

        self.storage.remove(&self.config.storage_key).map_err(|e| {
            tracing::warn!(error = %e, "Failed to forget persisted wallet address");
            WalletError::from(e)
        })
    }

    async fn request_address(&self, provider: &dyn WalletProvider) -> WalletResult<String> {
        let chain_id = &self.config.chain_id;
        provider.enable(chain_id).await?;

        provider
            .accounts(chain_id)
            .await?
            .into_iter()
            .next()
            .map(|account| account.address)
            .ok_or_else(|| WalletError::NoAccounts(chain_id.clone()))
    }
}

/// Clears the in-flight flag however `connect` exits
struct InFlight<'a>(&'a WalletSession);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.store(false, Ordering::Release);
        self.0.status.send_modify(|status| status.connecting = false);
    }
}

/// Shorten an address to `neutron1...wxyz`
pub fn format_address(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }

    let count = address.chars().count();
    let head: String = address.chars().take(8).collect();
    let tail: String = address.chars().skip(count.saturating_sub(4)).collect();
    format!("{}...{}", head, tail)
}
