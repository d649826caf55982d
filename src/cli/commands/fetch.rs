//! Fetch command - populate the cache without reporting

use crate::builds::load_sources;
use crate::cli::args::FetchArgs;
use crate::config::Config;
use crate::error::BuildPairResult;
use crate::fetch::{LoadOrigin, Loader, UreqClient};
use crate::ui::{self, UiContext};

/// Execute the fetch command
pub async fn execute(args: FetchArgs, config: &Config) -> BuildPairResult<()> {
    let ctx = UiContext::detect();
    let loader = Loader::new(UreqClient::new()).with_refresh(args.refresh);

    let loaded = load_sources(
        &loader,
        config.server.normalized_base_url(),
        &config.cache.dir,
    )
    .await?;

    for entry in &loaded {
        let origin = match entry.origin {
            LoadOrigin::Cache => "already cached",
            LoadOrigin::Network => "downloaded",
        };
        let count = match entry.data.build_count() {
            Some(n) => format!("{} builds", n),
            None => "no builds array".to_string(),
        };
        ui::step_ok_detail(&ctx, &format!("{}: {}", entry.source, count), origin);
    }

    Ok(())
}
