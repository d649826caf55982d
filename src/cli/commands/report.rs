//! Report command - print the duration table

use crate::builds::load_build_set;
use crate::cli::args::{ReportArgs, ReportFormat};
use crate::config::Config;
use crate::error::{BuildPairError, BuildPairResult};
use crate::fetch::{HttpClient, Loader, UreqClient};
use crate::report::{self, ReportRow};
use crate::ui::{TaskSpinner, UiContext};
use std::io::Write;

/// Execute the report command
pub async fn execute(args: ReportArgs, config: &Config) -> BuildPairResult<()> {
    let loader = Loader::new(UreqClient::new()).with_refresh(args.refresh);

    let ctx = UiContext::detect();
    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Loading build data...");

    let rows = match collect_rows(&loader, config).await {
        Ok(rows) => {
            spinner.stop(&format!("Paired {} browser runs", rows.len()));
            rows
        }
        Err(e) => {
            spinner.stop_error("Failed to load build data");
            return Err(e);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_rows(&mut out, args.format, &rows)
}

/// Load the configured sources and compute report rows
pub async fn collect_rows<C: HttpClient>(
    loader: &Loader<C>,
    config: &Config,
) -> BuildPairResult<Vec<ReportRow>> {
    let base_url = config.server.normalized_base_url();
    let builds = load_build_set(loader, base_url, &config.cache.dir).await?;
    Ok(report::generate(base_url, &builds))
}

fn write_rows<W: Write>(out: &mut W, format: ReportFormat, rows: &[ReportRow]) -> BuildPairResult<()> {
    match format {
        ReportFormat::Markdown => report::write_markdown(out, rows)
            .map_err(|e| BuildPairError::io("writing report", e)),
        ReportFormat::Json => report::write_json(out, rows),
    }
}
