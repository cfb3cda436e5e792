//! Client configuration loading
//!
//! Reads `~/.config/eisen/config.toml`. Every key is optional; a missing
//! file yields the defaults.

use std::path::Path;
use std::time::Duration;

use eisen_utils::{EisenError, Result};

/// Full client configuration
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub web: WebConfig,
    pub sync: SyncConfig,
}

/// Where the matrix service lives
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Versioned base URL, e.g. `http://localhost:8000/api/v1`
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: format!("http://localhost:8000{}", eisen_protocol::API_PREFIX),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    /// Per-request timeout, never shorter than one second
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Origin of the web frontend, used to mint share links
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub origin: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:5173".into(),
        }
    }
}

/// Polling behaviour
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Interval between full refreshes (default: 5000)
    pub poll_interval_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5000,
        }
    }
}

impl SyncConfig {
    /// Poll interval, never shorter than 100ms
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(100))
    }
}

impl ClientConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration
    ///
    /// With an explicit path the file must exist and parse. Without one the
    /// default location is tried and any problem falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_strict(path),
            None => Ok(Self::load_lenient(&eisen_utils::config_file())),
        }
    }

    fn load_strict(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(EisenError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|e| EisenError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content).map_err(|e| EisenError::ConfigInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn load_lenient(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("Config file not found, using defaults");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => {
                    tracing::debug!(
                        "Loaded config: api={}, web={}, poll={}ms",
                        config.api.base_url,
                        config.web.origin,
                        config.sync.poll_interval_ms
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Apply command line / environment overrides
    pub fn with_overrides(mut self, api_url: Option<String>, web_url: Option<String>) -> Self {
        if let Some(api_url) = api_url {
            self.api.base_url = api_url;
        }
        if let Some(web_url) = web_url {
            self.web.origin = web_url;
        }
        self
    }
}
