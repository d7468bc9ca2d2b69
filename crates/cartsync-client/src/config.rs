//! # Client Configuration
//!
//! Where the commerce API lives and how long to wait for it.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CARTSYNC_API_BASE=https://vue3-course-api.hexschool.io/v2          │
//! │     CARTSYNC_API_PATH=my-shop                                          │
//! │     CARTSYNC_TIMEOUT_SECS=30                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/cartsync/cartsync.toml (Linux)                           │
//! │     ~/Library/Application Support/io.cartsync.cartsync/... (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "https://vue3-course-api.hexschool.io/v2"
//! api_path = "my-shop"
//! timeout_secs = 30
//! connect_timeout_secs = 10
//! user_agent = "cartsync/0.1.0"
//! ```
//!
//! Every endpoint resolves to `{base_url}/api/{api_path}/{endpoint}`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Environment variable overriding `api.base_url`.
pub const ENV_API_BASE: &str = "CARTSYNC_API_BASE";
/// Environment variable overriding `api.api_path`.
pub const ENV_API_PATH: &str = "CARTSYNC_API_PATH";
/// Environment variable overriding `api.timeout_secs`.
pub const ENV_TIMEOUT_SECS: &str = "CARTSYNC_TIMEOUT_SECS";

// =============================================================================
// API Settings
// =============================================================================

/// Connection settings for the commerce API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Versioned API root, e.g. `https://host/v2`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-shop path segment placed after `/api/`.
    #[serde(default = "default_api_path")]
    pub api_path: String,

    /// Whole-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// TCP connect timeout (seconds).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://vue3-course-api.hexschool.io/v2".to_string()
}

fn default_api_path() -> String {
    "cartsync".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("cartsync/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            api_path: default_api_path(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,
}

impl ClientConfig {
    /// Creates a config for a base URL and shop path, other fields default.
    pub fn new(base_url: impl Into<String>, api_path: impl Into<String>) -> Self {
        ClientConfig {
            api: ApiSettings {
                base_url: base_url.into(),
                api_path: api_path.into(),
                ..ApiSettings::default()
            },
        }
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (cartsync.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        Self::load_with(config_path, |_| {})
    }

    /// Like [`ClientConfig::load`], but runs `adjust` after the environment
    /// overrides and before validation. Command-line flags go here, so a
    /// flag can repair a value that would not validate on its own.
    pub fn load_with<F>(config_path: Option<PathBuf>, adjust: F) -> ClientResult<Self>
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        adjust(&mut config);

        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file and returns the path written.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.api.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        let path = self.api.api_path.trim();
        if path.is_empty() {
            return Err(ClientError::InvalidConfig("api_path must not be empty".into()));
        }
        if path.contains('/') {
            return Err(ClientError::InvalidConfig(format!(
                "api_path must be a single path segment, got: {}",
                path
            )));
        }

        if self.api.timeout_secs == 0 || self.api.connect_timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeouts must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`ClientConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(ENV_API_BASE) {
            debug!(base_url = %base, "Overriding API base URL from environment");
            self.api.base_url = base;
        }

        if let Some(path) = lookup(ENV_API_PATH) {
            debug!(api_path = %path, "Overriding API path from environment");
            self.api.api_path = path;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric {}", ENV_TIMEOUT_SECS),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("io", "cartsync", "cartsync")
            .map(|dirs| dirs.config_dir().join("cartsync.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Builds the full URL for an endpoint such as `cart` or `cart/-Nabc`.
    ///
    /// ```rust
    /// use cartsync_client::ClientConfig;
    ///
    /// let config = ClientConfig::new("https://api.example.com/v2/", "shop");
    /// assert_eq!(
    ///     config.endpoint("cart").unwrap().as_str(),
    ///     "https://api.example.com/v2/api/shop/cart"
    /// );
    /// ```
    pub fn endpoint(&self, endpoint: &str) -> ClientResult<Url> {
        let base = self.api.base_url.trim_end_matches('/');
        let path = self.api.api_path.trim();
        let endpoint = endpoint.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}/{endpoint}"))?)
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Returns the connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.api.connect_timeout_secs)
    }
}
