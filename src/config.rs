//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::rally::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_STEP};
use crate::wallet::{SessionConfig, DEFAULT_CHAIN_ID, DEFAULT_STORAGE_KEY};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wallet: WalletConfig,

    #[serde(default)]
    pub explore: ExploreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Wallet session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    #[serde(default = "default_chain_id")]
    pub chain_id: String,

    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Where file-backed sessions keep the connected address
    #[serde(default = "default_session_file")]
    pub session_file: String,
}

fn default_chain_id() -> String {
    DEFAULT_CHAIN_ID.to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_session_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("padi").join("session.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./padi_session.json".to_string())
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            storage_key: default_storage_key(),
            session_file: default_session_file(),
        }
    }
}

impl WalletConfig {
    /// Settings for a [`WalletSession`](crate::wallet::WalletSession)
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            chain_id: self.chain_id.clone(),
            storage_key: self.storage_key.clone(),
        }
    }
}

/// Explore page configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExploreConfig {
    /// Rallies shown before "load more"
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Rallies added per "load more"
    #[serde(default = "default_page_step")]
    pub page_step: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_page_step() -> usize {
    DEFAULT_PAGE_STEP
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_step: default_page_step(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber
    ///
    /// `RUST_LOG` wins over the configured level.
    pub fn init(&self) {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| format!("padi={}", self.level).into());

        let registry = tracing_subscriber::registry().with(filter);
        if self.format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("padi").join("config.toml")),
            Some(PathBuf::from("./padi.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Wallet overrides
        if let Ok(chain_id) = std::env::var("PADI_CHAIN_ID") {
            self.wallet.chain_id = chain_id;
        }
        if let Ok(key) = std::env::var("PADI_STORAGE_KEY") {
            self.wallet.storage_key = key;
        }
        if let Ok(file) = std::env::var("PADI_SESSION_FILE") {
            self.wallet.session_file = file;
        }

        // Explore overrides
        if let Ok(size) = std::env::var("PADI_PAGE_SIZE") {
            if let Ok(n) = size.parse() {
                self.explore.page_size = n;
            }
        }
        if let Ok(step) = std::env::var("PADI_PAGE_STEP") {
            if let Ok(n) = step.parse() {
                self.explore.page_step = n;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("PADI_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PADI_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Padi Configuration
#
# Environment variables override these settings:
# - PADI_CHAIN_ID
# - PADI_STORAGE_KEY
# - PADI_SESSION_FILE
# - PADI_PAGE_SIZE
# - PADI_PAGE_STEP
# - PADI_LOG_LEVEL
# - PADI_LOG_FORMAT

[wallet]
# Chain the wallet extension is asked to enable
chain_id = "neutron-1"

# Key under which the connected address is stored
storage_key = "walletAddress"

# File holding the session for command-line use
# (default: <data dir>/padi/session.json)
# session_file = "/var/lib/padi/session.json"

[explore]
# Rallies shown before "load more"
page_size = 6

# Rallies revealed by each "load more"
page_step = 3

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
