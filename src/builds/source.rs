//! The four builder queries a report is built from

use std::fmt;
use std::path::{Path, PathBuf};

/// A builder query and the cache file it is persisted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildSource {
    /// Builds that kick off a run; carry `got_revision` and `build_speed`
    Initiator,
    /// Remote browser runs
    Remote,
    /// Local browser runs
    Local,
    /// Result uploads; carry `revision` and `browser_name`
    Uploader,
}

impl BuildSource {
    /// All sources in fetch order
    pub const ALL: [BuildSource; 4] = [
        BuildSource::Initiator,
        BuildSource::Remote,
        BuildSource::Local,
        BuildSource::Uploader,
    ];

    /// Whether the report decodes this source's builds; the others are
    /// fetched and cached but kept as raw documents
    pub fn is_paired(&self) -> bool {
        matches!(self, Self::Initiator | Self::Uploader)
    }

    pub fn builder_id(&self) -> u32 {
        match self {
            Self::Remote => 1,
            Self::Initiator => 2,
            Self::Local => 3,
            Self::Uploader => 4,
        }
    }

    /// Properties requested alongside each build
    pub fn properties(&self) -> [&'static str; 2] {
        match self {
            Self::Initiator => ["got_revision", "build_speed"],
            Self::Remote | Self::Local | Self::Uploader => ["revision", "browser_name"],
        }
    }

    pub fn cache_file_name(&self) -> &'static str {
        match self {
            Self::Initiator => "initiator-builds.json",
            Self::Remote => "remote-builds.json",
            Self::Local => "local-builds.json",
            Self::Uploader => "uploader-builds.json",
        }
    }

    pub fn cache_path(&self, cache_dir: &Path) -> PathBuf {
        cache_dir.join(self.cache_file_name())
    }

    /// API URL for this source's builds
    pub fn url(&self, base_url: &str) -> String {
        let query = self
            .properties()
            .iter()
            .map(|p| format!("property={}", p))
            .collect::<Vec<_>>()
            .join("&");
        format!(
            "{}/api/v2/builders/{}/builds?{}",
            base_url.trim_end_matches('/'),
            self.builder_id(),
            query
        )
    }
}

impl fmt::Display for BuildSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initiator => "initiator",
            Self::Remote => "remote",
            Self::Local => "local",
            Self::Uploader => "uploader",
        };
        f.write_str(name)
    }
}
