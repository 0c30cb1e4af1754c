//! Wallet configuration with TOML file support.

use std::path::Path;

use ballot_utils::{init_logging, LogFormat};
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// Runtime options of a [`Wallet`](crate::Wallet).
///
/// Can be loaded from a TOML file via [`WalletConfig::from_toml_file`] or
/// built programmatically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether confirming an unknown fragment is an error.
    #[serde(default = "default_true")]
    pub strict_confirmation: bool,

    /// Upper bound on tracked fragments. Only confirmed fragments are evicted.
    #[serde(default = "default_max_tracked_fragments")]
    pub max_tracked_fragments: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_tracked_fragments() -> usize {
    1024
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            strict_confirmation: default_true(),
            max_tracked_fragments: default_max_tracked_fragments(),
        }
    }
}

impl WalletConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, WalletError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| WalletError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, WalletError> {
        toml::from_str(s).map_err(|e| WalletError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, WalletError> {
        toml::to_string_pretty(self).map_err(|e| WalletError::Config(e.to_string()))
    }

    /// Install the global tracing subscriber described by this config.
    pub fn init_logging(&self) -> Result<(), WalletError> {
        init_logging(self.log_format, &self.log_level)
            .map_err(|e| WalletError::Config(e.to_string()))
    }
}
