//! Configuration management for chronicler.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "chronicler";

/// Default collector endpoint.
const DEFAULT_ENDPOINT: &str = "http://localhost:8000/log-event/";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CHRONICLER_`)
/// 2. TOML config file at `~/.config/chronicler/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Flush policy configuration.
    pub flush: FlushConfig,
    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Flush-policy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlushConfig {
    /// Pending-batch size that triggers an immediate flush.
    pub batch_threshold: usize,
    /// Inactivity delay in milliseconds before a partial batch is flushed.
    pub idle_delay_ms: u64,
}

/// Transport-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Collector endpoint the batches are POSTed to.
    pub endpoint: String,
    /// Per-request timeout in milliseconds for the background delivery.
    pub request_timeout_ms: u64,
}

impl Default for FlushConfig {
    fn default() -> Self {
        Self {
            batch_threshold: 20,
            idle_delay_ms: 2500,
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `CHRONICLER_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("CHRONICLER_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.flush.batch_threshold == 0 {
            return Err(Error::ConfigValidation {
                message: "batch_threshold must be greater than 0".to_string(),
            });
        }

        if self.flush.idle_delay_ms == 0 {
            return Err(Error::ConfigValidation {
                message: "idle_delay_ms must be greater than 0".to_string(),
            });
        }

        if self.transport.request_timeout_ms == 0 {
            return Err(Error::ConfigValidation {
                message: "request_timeout_ms must be greater than 0".to_string(),
            });
        }

        if reqwest::Url::parse(&self.transport.endpoint).is_err() {
            return Err(Error::ConfigValidation {
                message: format!("invalid endpoint URL: {}", self.transport.endpoint),
            });
        }

        Ok(())
    }

    /// Get the inactivity delay as a Duration.
    #[must_use]
    pub fn idle_delay(&self) -> Duration {
        Duration::from_millis(self.flush.idle_delay_ms)
    }
}

impl TransportConfig {
    /// Get the per-request timeout as a Duration.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
