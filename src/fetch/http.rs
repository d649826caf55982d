//! HTTP client abstraction
//!
//! The loader only needs a status code and the full body; keeping that
//! behind a trait lets tests substitute a stub for the network.

use crate::error::{BuildPairError, BuildPairResult};
use async_trait::async_trait;
use tracing::debug;

/// Largest response body accepted from the server
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

const USER_AGENT: &str = concat!("buildpair/", env!("CARGO_PKG_VERSION"));

/// A fully drained HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Minimal HTTP GET interface
///
/// Implementations must read the whole body, whatever the status, so the
/// underlying connection is released before returning.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET request and return the drained response
    async fn get(&self, url: &str) -> BuildPairResult<RawResponse>;
}

/// `ureq`-backed client, run on tokio's blocking pool
#[derive(Clone)]
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    pub fn new() -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for UreqClient {
    async fn get(&self, url: &str) -> BuildPairResult<RawResponse> {
        let agent = self.agent.clone();
        let url = url.to_string();

        tokio::task::spawn_blocking(move || get_blocking(&agent, &url))
            .await
            .map_err(|e| BuildPairError::Internal(format!("fetch task failed: {}", e)))?
    }
}

fn get_blocking(agent: &ureq::Agent, url: &str) -> BuildPairResult<RawResponse> {
    let mut response = agent
        .get(url)
        .header("Accept", "application/json")
        .header("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| transport_error(url, e))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .with_config()
        .limit(MAX_BODY_BYTES)
        .read_to_vec()
        .map_err(|e| transport_error(url, e))?;

    debug!("GET {} -> {} ({} bytes)", url, status, body.len());
    Ok(RawResponse { status, body })
}

fn transport_error(url: &str, e: ureq::Error) -> BuildPairError {
    BuildPairError::Transport {
        url: url.to_string(),
        reason: e.to_string(),
    }
}
