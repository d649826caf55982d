//! Error types for buildpair
//!
//! All modules use `BuildPairResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for buildpair operations
pub type BuildPairResult<T> = Result<T, BuildPairError>;

/// All errors that can occur in buildpair
#[derive(Error, Debug)]
pub enum BuildPairError {
    // Network errors
    #[error("Request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    // Payload errors
    #[error("Malformed JSON from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected build data in {origin}: {reason}")]
    Schema { origin: String, reason: String },

    // Cache errors
    #[error("Failed to write cache file {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BuildPairError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a cache write error
    pub fn cache_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a schema error for a named data origin
    pub fn schema(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Schema {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    /// Check if the error came from talking to the CI server
    pub fn is_network(&self) -> bool {
        matches!(self, Self::HttpStatus { .. } | Self::Transport { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::HttpStatus { status: 404, .. } => {
                Some("Check --base-url; the builder may not exist on this server")
            }
            _ if self.is_network() => Some("Check --base-url and your network connection"),
            Self::Schema { .. } => {
                Some("The cached data may be stale. Run: buildpair report --refresh")
            }
            Self::CacheWrite { .. } => Some("Check that --cache-dir is writable"),
            _ => None,
        }
    }
}
