//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// buildpair - Buildbot stage duration report
///
/// Pairs initiator builds with the uploads they produced and reports how
/// long each browser run took.
#[derive(Parser, Debug)]
#[command(name = "buildpair")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BUILDPAIR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Buildbot server base URL
    #[arg(long, global = true, env = "BUILDPAIR_BASE_URL")]
    pub base_url: Option<String>,

    /// Directory holding the cached API responses
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the initiator/uploader duration table
    Report(ReportArgs),

    /// Download build data into the cache without reporting
    Fetch(FetchArgs),

    /// Inspect or clear cached API responses
    Cache(CacheArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Ignore cached responses and fetch everything again
    #[arg(long)]
    pub refresh: bool,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    pub format: ReportFormat,
}

/// Arguments for the fetch command
#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Overwrite existing cache files
    #[arg(long)]
    pub refresh: bool,
}

/// Output format for the report command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Markdown table
    Markdown,
    /// JSON array of rows
    Json,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cache files and their state
    List,

    /// Delete all cache files
    Clear,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show effective configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}
