//! Segmenter Configuration Module
//!
//! Provides configuration file support via `segmenter.toml`, environment
//! variables, and runtime overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (CLI flags)
//! 2. Environment variables (`SEGMENTER_*`, sections separated by `__`,
//!    e.g. `SEGMENTER_WOOCOMMERCE__BASE_URL`)
//! 3. Configuration file (`segmenter.toml`)
//! 4. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address.
    pub host: String,
    /// Port number.
    pub port: u16,
    /// Maximum HTTP body size in bytes.
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_body_size: 1_048_576, // 1 MB
        }
    }
}

/// Catalog configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON snapshot loaded at startup (array of products).
    pub snapshot_path: Option<String>,
}

/// WooCommerce ingestion configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WooCommerceConfig {
    /// Store base URL, e.g. `https://shop.example.com`.
    pub base_url: Option<String>,
    /// REST API consumer key.
    pub consumer_key: Option<String>,
    /// REST API consumer secret.
    pub consumer_secret: Option<String>,
    /// Products requested per page.
    pub per_page: u32,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Upper bound on pages fetched by one ingestion.
    pub max_pages: u32,
}

impl Default for WooCommerceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            consumer_key: None,
            consumer_secret: None,
            per_page: 100,
            timeout_secs: 30,
            max_pages: 1_000,
        }
    }
}

impl WooCommerceConfig {
    /// Returns `true` when the base URL and both credentials are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        [&self.base_url, &self.consumer_key, &self.consumer_secret]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main Segmenter configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Catalog configuration.
    pub catalog: CatalogConfig,
    /// WooCommerce ingestion configuration.
    pub woocommerce: WooCommerceConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl SegmenterConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("segmenter.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("SEGMENTER_").split("__"));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.port".to_string(),
                message: "value 0 is not a valid port".to_string(),
            });
        }

        if self.server.max_body_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.max_body_size".to_string(),
                message: "value must be greater than 0".to_string(),
            });
        }

        if !(1..=100).contains(&self.woocommerce.per_page) {
            return Err(ConfigError::InvalidValue {
                key: "woocommerce.per_page".to_string(),
                message: format!(
                    "value {} is out of range [1, 100]",
                    self.woocommerce.per_page
                ),
            });
        }

        if self.woocommerce.max_pages == 0 {
            return Err(ConfigError::InvalidValue {
                key: "woocommerce.max_pages".to_string(),
                message: "value must be greater than 0".to_string(),
            });
        }

        if let Some(url) = &self.woocommerce.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    key: "woocommerce.base_url".to_string(),
                    message: format!("'{url}' must start with http:// or https://"),
                });
            }
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        Ok(())
    }
}
