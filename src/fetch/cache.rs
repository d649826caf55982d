//! On-disk JSON cache for API responses
//!
//! A cache file is trusted until it is removed; there is no expiry.

use crate::error::{BuildPairError, BuildPairResult};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Outcome of looking up a cache file
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// File present and valid JSON
    Hit(Value),
    /// No file; fetching is the expected next step
    Absent,
    /// File present but unreadable or not JSON
    Corrupt(String),
}

/// Read and parse the cache file at `path`
pub async fn lookup(path: &Path) -> CacheLookup {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return CacheLookup::Absent,
        Err(e) => return CacheLookup::Corrupt(e.to_string()),
    };

    match serde_json::from_str(&content) {
        Ok(value) => CacheLookup::Hit(value),
        Err(e) => CacheLookup::Corrupt(e.to_string()),
    }
}

/// Persist `value` to `path`, replacing any existing file
pub async fn store(path: &Path, value: &Value) -> BuildPairResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| BuildPairError::cache_write(parent, e))?;
    }

    let content = serde_json::to_string(value)?;
    fs::write(path, content)
        .await
        .map_err(|e| BuildPairError::cache_write(path, e))?;

    debug!("Cached {}", path.display());
    Ok(())
}

/// Remove the cache file at `path`; returns whether one existed
pub async fn remove(path: &Path) -> BuildPairResult<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(BuildPairError::io(
            format!("removing cache file {}", path.display()),
            e,
        )),
    }
}

/// Size on disk of the cache file, if present
pub async fn size(path: &Path) -> Option<u64> {
    fs::metadata(path).await.ok().map(|m| m.len())
}
