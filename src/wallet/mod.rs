//! Wallet Session
//!
//! Simulated wallet connectivity:
//!
//! - **session**: `WalletSession`, the connected/disconnected state machine
//! - **provider**: `WalletProvider` trait for the injected wallet extension
//! - **storage**: `KeyValueStore` trait and its memory, file and browser backends
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use padi::wallet::{MemoryStore, SessionConfig, SimulatedWallet, WalletSession};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = WalletSession::new(
//!         Some(Arc::new(SimulatedWallet::new("neutron1demo"))),
//!         Arc::new(MemoryStore::new()),
//!         SessionConfig::default(),
//!     );
//!     session.restore()?;
//!
//!     let address = session.connect().await?;
//!     assert_eq!(address, "neutron1demo");
//!
//!     session.disconnect()?;
//!     assert!(!session.is_connected());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod provider;
pub mod session;
pub mod storage;

pub use error::{StorageError, StorageResult, WalletError, WalletResult};
pub use provider::{Account, SimulatedWallet, WalletProvider};
pub use session::{
    format_address, simulated_balances, zero_balances, Balance, SessionConfig, SessionStatus,
    WalletSession, DEFAULT_CHAIN_ID, DEFAULT_STORAGE_KEY,
};
#[cfg(feature = "web")]
pub use storage::BrowserStore;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
