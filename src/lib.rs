//! # Padi
//!
//! State core of a crowdfunding platform: browse funding "rallies", create
//! new ones, comment on them, and connect a (simulated) wallet.
//!
//! ## Features
//!
//! - **Rally store**: In-memory, newest-first, copy-on-write snapshots
//! - **Change feed**: Broadcast events after every mutation
//! - **Explore views**: Search, four sort orders, "load more" pagination
//! - **Wallet session**: Connect/disconnect/restore through injected
//!   provider and key-value storage
//!
//! ## Modules
//!
//! - [`rally`]: Rally store, types and derived views
//! - [`wallet`]: Wallet session, providers and persistence backends
//! - [`forms`]: Validation in front of the store
//! - [`notice`]: User-visible notifications
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use padi::{CommentForm, MemoryStore, RallyStore, SessionConfig, SimulatedWallet, WalletSession};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = RallyStore::new();
//!     let session = WalletSession::new(
//!         Some(Arc::new(SimulatedWallet::new("neutron1demo"))),
//!         Arc::new(MemoryStore::new()),
//!         SessionConfig::default(),
//!     );
//!
//!     session.connect().await?;
//!
//!     let notice = CommentForm::new("1", "Love this garden!").submit(&session, &mut store)?;
//!     println!("{}", notice);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod forms;
pub mod notice;
pub mod rally;
pub mod wallet;

// Re-export top-level types for convenience
pub use rally::{
    Comment, ExplorePage, ExploreQuery, NewComment, Rally, RallyError, RallyStore, SortOrder,
    StoreEvent, Token,
};

pub use wallet::{
    Balance, FileStore, KeyValueStore, MemoryStore, SessionConfig, SessionStatus,
    SimulatedWallet, StorageError, WalletError, WalletProvider, WalletSession,
};

pub use forms::{CommentForm, FormError, RallyForm};

pub use notice::{Notice, NoticeVariant};

pub use config::{Config, ConfigError, ExploreConfig, LoggingConfig, WalletConfig};
