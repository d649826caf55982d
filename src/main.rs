//! buildpair - Buildbot stage duration report
//!
//! CLI entry point that dispatches to subcommands.

use buildpair::cli::{Cli, Commands};
use buildpair::config::ConfigManager;
use buildpair::error::BuildPairResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> BuildPairResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };

    let mut config = config_manager.load().await?;
    config.apply_overrides(cli.base_url.clone(), cli.cache_dir.clone());

    init_logging(cli.verbose, &config.general.log_format);
    debug!(
        "Using {} with cache in {}",
        config.server.normalized_base_url(),
        config.cache.dir.display()
    );

    match cli.command {
        Commands::Report(args) => buildpair::cli::commands::report(args, &config).await,
        Commands::Fetch(args) => buildpair::cli::commands::fetch(args, &config).await,
        Commands::Cache(args) => buildpair::cli::commands::cache(args, &config).await,
        Commands::Config(args) => {
            buildpair::cli::commands::config(args, &config, &config_manager).await
        }
    }
}

/// 0 = warn, 1 = info, 2+ = debug; always on stderr
fn init_logging(verbose: u8, format: &str) {
    let filter = match verbose {
        0 => EnvFilter::new("buildpair=warn"),
        1 => EnvFilter::new("buildpair=info"),
        _ => EnvFilter::new("buildpair=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
