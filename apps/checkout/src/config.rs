//! # Checkout Configuration
//!
//! Configuration for the checkout binary.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TILL_LOG_LEVEL=debug                                               │
//! │     TILL_RECEIPT_JSON=true                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, or                                                  │
//! │     ~/.config/checkout/checkout.toml (Linux)                           │
//! │     ~/Library/Application Support/com.till.checkout/checkout.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     info logging, text receipt, built-in rates only                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # checkout.toml
//! [logging]
//! level = "info"   # trace | debug | info | warn | error
//!
//! [receipt]
//! json = false
//!
//! # Replace a built-in rate or register a new calculator
//! [rates]
//! Default = "0.10"
//! Luxury = "0.20"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use till_core::TaxRate;
use tracing::{debug, info};

/// Levels accepted by `logging.level` and `TILL_LOG_LEVEL`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

// =============================================================================
// Config Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Rate for calculator '{name}' must be between 0 and 1, got {rate}")]
    RateOutOfRange { name: String, rate: Decimal },
}

// =============================================================================
// Sections
// =============================================================================

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level. `RUST_LOG` still wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

/// Receipt output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptConfig {
    /// Print the order as JSON instead of the text receipt.
    #[serde(default)]
    pub json: bool,
}

// =============================================================================
// Main Checkout Configuration
// =============================================================================

/// Complete checkout configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub receipt: ReceiptConfig,

    /// Calculator name → rate. Replaces the built-in calculator of that name
    /// or adds a new one.
    #[serde(default)]
    pub rates: BTreeMap<String, TaxRate>,

    /// File the values were read from, `None` when running on defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,

    /// `TILL_*` variables that overrode a value.
    #[serde(skip)]
    pub env_overrides: Vec<&'static str>,
}

impl CheckoutConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file: `config_path` if given (must exist), otherwise the
    ///    platform default path if a file is there
    /// 3. Environment variables
    ///
    /// Runs before the subscriber exists, so nothing is logged here. The
    /// chosen file and the applied overrides are kept on the config for
    /// [`CheckoutConfig::log_summary`].
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let source = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path)),
            Some(path) => Some(path),
            None => Self::default_config_path().filter(|path| path.exists()),
        };

        let mut config = match &source {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.source = source;

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                value: self.logging.level.clone(),
            });
        }

        for (name, rate) in &self.rates {
            if rate.fraction() < Decimal::ZERO || rate.fraction() > Decimal::ONE {
                return Err(ConfigError::RateOutOfRange {
                    name: name.clone(),
                    rate: rate.fraction(),
                });
            }
        }

        Ok(())
    }

    /// Applies `TILL_*` overrides read through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("TILL_LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
            self.env_overrides.push("TILL_LOG_LEVEL");
        }

        if let Some(json) = lookup("TILL_RECEIPT_JSON") {
            self.receipt.json = json.parse().map_err(|_| ConfigError::InvalidValue {
                key: "TILL_RECEIPT_JSON".to_string(),
                value: json.clone(),
            })?;
            self.env_overrides.push("TILL_RECEIPT_JSON");
        }

        Ok(())
    }

    /// Logs where the configuration came from. Call after `logging::init`.
    pub fn log_summary(&self) {
        match &self.source {
            Some(path) => info!(?path, "Loaded checkout config from file"),
            None => debug!("No config file found, using defaults"),
        }

        for key in &self.env_overrides {
            debug!(key = *key, "Overridden from environment");
        }

        info!(
            level = %self.logging.level,
            json = self.receipt.json,
            rate_overrides = self.rates.len(),
            "Configuration loaded"
        );
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "till", "checkout")
            .map(|dirs| dirs.config_dir().join("checkout.toml"))
    }
}
