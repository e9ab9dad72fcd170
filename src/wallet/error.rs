//! Wallet session error types

use thiserror::Error;

/// Errors from a key-value persistence backend
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Backend cannot be reached (no window, storage disabled, ...)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type alias for persistence operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while connecting or disconnecting a wallet
#[derive(Error, Debug)]
pub enum WalletError {
    /// No wallet extension is installed
    #[error("Wallet extension not installed")]
    ExtensionMissing,

    /// The extension refused (user cancelled, chain not enabled, ...)
    #[error("Wallet request rejected: {0}")]
    Rejected(String),

    /// The extension returned no accounts for the chain
    #[error("No accounts available for chain {0}")]
    NoAccounts(String),

    /// A connect attempt is already waiting on the extension
    #[error("A wallet connection is already in progress")]
    ConnectInProgress,

    /// Persisting the session failed
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;
