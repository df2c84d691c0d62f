//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (GEOPROV_*)
//! 2. TOML config file (if GEOPROV_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (GEOPROV_*)
/// 2. TOML config file (if GEOPROV_CONFIG_FILE set)
/// 3. Built-in defaults
///
/// Construction-time injection replaces the original deployment's ambient
/// global constants: the cache store and hub client each receive the values
/// they need from this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where normalized snapshots are stored.
    ///
    /// Set via GEOPROV_STORAGE_ROOT environment variable.
    #[serde(default = "default_storage_root")]
    pub storage_root: PathBuf,

    /// Snapshot retention window in weeks for the sweep.
    ///
    /// Set via GEOPROV_RETENTION_WEEKS environment variable.
    #[serde(default = "default_retention_weeks")]
    pub retention_weeks: i64,

    /// Base domain of the ArcGIS Hub catalog.
    ///
    /// Set via GEOPROV_HUB_DOMAIN environment variable.
    #[serde(default = "default_hub_domain")]
    pub hub_domain: String,

    /// Path prefix for remote item metadata (thumbnails).
    ///
    /// Set via GEOPROV_ITEM_PATH environment variable.
    #[serde(default = "default_item_path")]
    pub item_path: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via GEOPROV_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via GEOPROV_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Socket address the HTTP server binds to.
    ///
    /// Set via GEOPROV_BIND_ADDR environment variable.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("data")
}

fn default_retention_weeks() -> i64 {
    4
}

fn default_hub_domain() -> String {
    "https://hub.arcgis.com".into()
}

fn default_item_path() -> String {
    "https://www.arcgis.com/sharing/rest/content/items".into()
}

fn default_user_agent() -> String {
    "geoprov/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_root: default_storage_root(),
            retention_weeks: default_retention_weeks(),
            hub_domain: default_hub_domain(),
            item_path: default_item_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            bind_addr: default_bind_addr(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `GEOPROV_`
    /// 2. TOML file from `GEOPROV_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("GEOPROV_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("GEOPROV_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
