//! Cache command - inspect or clear cached API responses

use crate::builds::{raw_build_count, BuildCollection, BuildSource};
use crate::cli::args::{CacheAction, CacheArgs};
use crate::config::Config;
use crate::error::BuildPairResult;
use crate::fetch::cache::{self, CacheLookup};
use crate::ui::{self, UiContext};
use console::style;
use std::path::Path;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> BuildPairResult<()> {
    match args.action {
        CacheAction::List => list_caches(&config.cache.dir).await,
        CacheAction::Clear => clear_caches(&config.cache.dir).await,
    }
}

/// State of one source's cache file
#[derive(Debug, Clone, PartialEq)]
enum CacheStatus {
    Missing,
    Corrupt(String),
    Present { bytes: u64, builds: Option<usize> },
}

/// Paired sources count only builds the report can decode
async fn inspect(source: BuildSource, path: &Path) -> CacheStatus {
    match cache::lookup(path).await {
        CacheLookup::Absent => CacheStatus::Missing,
        CacheLookup::Corrupt(reason) => CacheStatus::Corrupt(reason),
        CacheLookup::Hit(value) => CacheStatus::Present {
            bytes: cache::size(path).await.unwrap_or(0),
            builds: if source.is_paired() {
                BuildCollection::from_value("cache", value)
                    .ok()
                    .map(|c| c.len())
            } else {
                raw_build_count(&value)
            },
        },
    }
}

async fn list_caches(dir: &Path) -> BuildPairResult<()> {
    println!(
        "{:<12} {:<28} {:<10} {:<10}",
        style("SOURCE").bold(),
        style("FILE").bold(),
        style("BUILDS").bold(),
        style("SIZE").bold()
    );
    println!("{}", "-".repeat(62));

    for source in BuildSource::ALL {
        let path = source.cache_path(dir);
        let (builds, size) = match inspect(source, &path).await {
            CacheStatus::Missing => (style("missing".to_string()).dim(), "-".to_string()),
            CacheStatus::Corrupt(_) => (style("corrupt".to_string()).red(), "-".to_string()),
            CacheStatus::Present { bytes, builds } => (
                match builds {
                    Some(n) => style(n.to_string()).green(),
                    None => style("invalid".to_string()).yellow(),
                },
                format!("{} B", bytes),
            ),
        };

        println!(
            "{:<12} {:<28} {:<10} {:<10}",
            source.to_string(),
            source.cache_file_name(),
            builds,
            size
        );
    }

    println!();
    println!("Cache directory: {}", dir.display());
    Ok(())
}

async fn clear_caches(dir: &Path) -> BuildPairResult<()> {
    let ctx = UiContext::detect();
    let mut removed = 0;

    for source in BuildSource::ALL {
        let path = source.cache_path(dir);
        if cache::remove(&path).await? {
            ui::step_ok(&ctx, &format!("Removed {}", path.display()));
            removed += 1;
        }
    }

    if removed == 0 {
        ui::step_info(&ctx, "No cache files to remove");
    }
    Ok(())
}
