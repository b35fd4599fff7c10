//! Configuration loading for rusved.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.rusve/config.toml` (user)
//! 3. `/etc/rusve/config.toml` (system)
//!
//! Unlike an explicit path, a missing user or system file is not an error:
//! every key has a default and the daemon starts with them.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::service::{OwnershipPolicy, RusveBuilder};
use crate::stream::DEFAULT_STREAM_BUFFER;
use crate::{RusveError, Result};

/// Daemon configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub ownership: OwnershipConfig,
    #[serde(default)]
    pub streams: StreamsConfig,
}

/// Server network configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:9742).
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            limits: LimitsConfig::default(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1:9742".to_string()
}

/// Resource limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum concurrent requests per connection (default: 100).
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl LimitsConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: default_max_concurrent(),
            request_timeout_secs: default_timeout(),
        }
    }
}

fn default_max_concurrent() -> usize {
    100
}

fn default_timeout() -> u64 {
    30
}

/// Identity resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Create accounts for unknown subjects on `Auth` (default: true).
    #[serde(default = "default_provision")]
    pub provision: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provision: default_provision(),
        }
    }
}

fn default_provision() -> bool {
    true
}

/// Owner deletion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnershipConfig {
    /// `"refuse"` (default) or `"cascade"`.
    #[serde(default)]
    pub on_delete: OwnershipPolicy,
}

/// Server-streaming responses.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamsConfig {
    /// Records buffered per streaming call (default: 64).
    #[serde(default = "default_buffer")]
    pub buffer: usize,
}

impl Default for StreamsConfig {
    fn default() -> Self {
        Self {
            buffer: default_buffer(),
        }
    }
}

fn default_buffer() -> usize {
    DEFAULT_STREAM_BUFFER
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided, must exist)
    /// 2. `~/.rusve/config.toml`
    /// 3. `/etc/rusve/config.toml`
    ///
    /// Falls back to defaults when no file is found.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            RusveError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            RusveError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(RusveError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".rusve").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/rusve/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Apply the policy sections to a services builder.
    pub fn apply(&self, builder: RusveBuilder) -> RusveBuilder {
        builder
            .provision_on_auth(self.auth.provision)
            .ownership(self.ownership.on_delete)
            .stream_buffer(self.streams.buffer)
    }
}
