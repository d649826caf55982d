//! Configuration schema for buildpair
//!
//! Configuration is stored at `~/.config/buildpair/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default CI server
pub const DEFAULT_BASE_URL: &str = "http://builds.wpt.fyi";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// CI server settings
    pub server: ServerConfig,

    /// Cache settings
    pub cache: CacheConfig,
}

impl Config {
    /// Apply command-line overrides on top of file values
    pub fn apply_overrides(&mut self, base_url: Option<String>, cache_dir: Option<PathBuf>) {
        if let Some(url) = base_url {
            self.server.base_url = url;
        }
        if let Some(dir) = cache_dir {
            self.cache.dir = dir;
        }
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// CI server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the Buildbot web UI and API
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ServerConfig {
    /// Base URL without a trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding the per-builder cache files
    pub dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}
