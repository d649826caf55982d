//! Cache-or-fetch loading of API documents
//!
//! A load first consults the cache file for the document. Only when that is
//! absent (or corrupt) is the server queried, and a successful response is
//! written back so the next run stays offline.
//!
//! # Cache States
//!
//! | Lookup | Network | Write |
//! |--------|---------|-------|
//! | Hit | no | no |
//! | Absent | yes | on success |
//! | Corrupt | yes (with warning) | on success, replaces file |

pub mod cache;
pub mod http;

pub use cache::CacheLookup;
pub use http::{HttpClient, RawResponse, UreqClient};

use crate::error::{BuildPairError, BuildPairResult};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

/// Where a loaded document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Cache,
    Network,
}

/// A loaded document and its origin
#[derive(Debug, Clone)]
pub struct Loaded {
    pub value: Value,
    pub origin: LoadOrigin,
}

/// Cache-or-fetch loader over an HTTP client
pub struct Loader<C> {
    client: C,
    refresh: bool,
}

impl<C: HttpClient> Loader<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            refresh: false,
        }
    }

    /// Ignore existing cache files and always fetch
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Load `url`, preferring the cache file at `cache_path`
    pub async fn load(&self, url: &str, cache_path: &Path) -> BuildPairResult<Value> {
        self.load_detailed(url, cache_path).await.map(|l| l.value)
    }

    /// Like [`Loader::load`], also reporting whether the cache was used
    pub async fn load_detailed(&self, url: &str, cache_path: &Path) -> BuildPairResult<Loaded> {
        if self.refresh {
            debug!("Refresh requested, skipping {}", cache_path.display());
        } else {
            match cache::lookup(cache_path).await {
                CacheLookup::Hit(value) => {
                    debug!("Cache hit: {}", cache_path.display());
                    return Ok(Loaded {
                        value,
                        origin: LoadOrigin::Cache,
                    });
                }
                CacheLookup::Absent => debug!("Cache miss: {}", cache_path.display()),
                CacheLookup::Corrupt(reason) => warn!(
                    "Cache file {} is unreadable ({}); fetching a fresh copy over it",
                    cache_path.display(),
                    reason
                ),
            }
        }

        let value = self.fetch(url).await?;
        cache::store(cache_path, &value).await?;

        Ok(Loaded {
            value,
            origin: LoadOrigin::Network,
        })
    }

    async fn fetch(&self, url: &str) -> BuildPairResult<Value> {
        info!("Fetching {}", url);
        let response = self.client.get(url).await?;

        if response.status != 200 {
            return Err(BuildPairError::HttpStatus {
                url: url.to_string(),
                status: response.status,
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| BuildPairError::Parse {
            origin: url.to_string(),
            source: e,
        })
    }
}
