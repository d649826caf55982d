//! Build data: typed records and the builder queries that produce them

pub mod model;
pub mod source;

pub use model::{raw_build_count, BuildCollection, BuildProperties, BuildRecord, Browser, Property};
pub use source::BuildSource;

use crate::error::{BuildPairError, BuildPairResult};
use crate::fetch::{HttpClient, LoadOrigin, Loader};
use futures_util::future::try_join_all;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Contents of one loaded source
///
/// Only paired sources are decoded; remote and local documents are kept as
/// the server returned them, so a record the report never reads cannot fail
/// it.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceData {
    Builds(BuildCollection),
    Raw(Value),
}

impl SourceData {
    /// Number of builds, if the document has a `builds` array
    pub fn build_count(&self) -> Option<usize> {
        match self {
            Self::Builds(collection) => Some(collection.len()),
            Self::Raw(value) => raw_build_count(value),
        }
    }
}

/// One source after loading
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub source: BuildSource,
    pub origin: LoadOrigin,
    pub data: SourceData,
}

/// Everything a report is computed from
///
/// `remote` and `local` are loaded (and cached) alongside the others but are
/// not consulted when pairing.
#[derive(Debug, Clone, Default)]
pub struct BuildSet {
    pub initiator: BuildCollection,
    pub remote: Value,
    pub local: Value,
    pub uploader: BuildCollection,
}

impl BuildSet {
    /// Assemble a set from loaded sources; every source must be present
    pub fn from_loaded(loaded: Vec<LoadedSource>) -> BuildPairResult<Self> {
        let mut set = Self::default();
        let mut seen = Vec::with_capacity(BuildSource::ALL.len());

        for entry in loaded {
            match (entry.source, entry.data) {
                (BuildSource::Initiator, SourceData::Builds(c)) => set.initiator = c,
                (BuildSource::Uploader, SourceData::Builds(c)) => set.uploader = c,
                (BuildSource::Remote, SourceData::Raw(v)) => set.remote = v,
                (BuildSource::Local, SourceData::Raw(v)) => set.local = v,
                (source, _) => {
                    return Err(BuildPairError::Internal(format!(
                        "{} builds were loaded in the wrong form",
                        source
                    )))
                }
            }
            seen.push(entry.source);
        }

        if let Some(source) = BuildSource::ALL.into_iter().find(|s| !seen.contains(s)) {
            return Err(BuildPairError::Internal(format!(
                "{} builds were not loaded",
                source
            )));
        }

        Ok(set)
    }
}

/// Load every source concurrently; the first failure aborts the rest
pub async fn load_sources<C: HttpClient>(
    loader: &Loader<C>,
    base_url: &str,
    cache_dir: &Path,
) -> BuildPairResult<Vec<LoadedSource>> {
    try_join_all(
        BuildSource::ALL
            .iter()
            .map(|&source| load_source(loader, source, base_url, cache_dir)),
    )
    .await
}

async fn load_source<C: HttpClient>(
    loader: &Loader<C>,
    source: BuildSource,
    base_url: &str,
    cache_dir: &Path,
) -> BuildPairResult<LoadedSource> {
    let path = source.cache_path(cache_dir);
    let loaded = loader.load_detailed(&source.url(base_url), &path).await?;

    let data = if source.is_paired() {
        let collection = BuildCollection::from_value(&path.display().to_string(), loaded.value)?;
        if collection.is_empty() {
            info!("The {} builder returned no builds", source);
        }
        SourceData::Builds(collection)
    } else {
        SourceData::Raw(loaded.value)
    };

    debug!(
        "Loaded {:?} {} builds from {:?}",
        data.build_count(),
        source,
        loaded.origin
    );

    Ok(LoadedSource {
        source,
        origin: loaded.origin,
        data,
    })
}

/// Load all four sources into a [`BuildSet`]
pub async fn load_build_set<C: HttpClient>(
    loader: &Loader<C>,
    base_url: &str,
    cache_dir: &Path,
) -> BuildPairResult<BuildSet> {
    BuildSet::from_loaded(load_sources(loader, base_url, cache_dir).await?)
}
