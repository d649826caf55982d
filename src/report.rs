//! Report rendering
//!
//! Durations run from the initiator's start to the upload's completion,
//! rounded to whole minutes and printed as `{hours}h {minutes}s`.

use crate::builds::{BuildRecord, BuildSet};
use crate::error::{BuildPairError, BuildPairResult};
use crate::pairing::{self, Pair};
use serde::Serialize;
use std::io::Write;

/// Markdown table header
pub const HEADER: [&str; 2] = [
    "Initiator | Browser | Uploader | Duration",
    "----------|---------|----------|---------",
];

/// Duration shown when there is nothing to measure
const NO_DURATION: &str = "∞";

/// Link shown when a build has no upload
const NO_LINK: &str = "n/a";

/// A build as it appears in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildRef {
    pub builder_id: u32,
    pub build_id: u64,
    pub url: String,
}

impl BuildRef {
    pub fn new(base_url: &str, build: &BuildRecord) -> Self {
        Self {
            builder_id: build.builder_id,
            build_id: build.build_id,
            url: format!(
                "{}/#/builders/{}/builds/{}",
                base_url.trim_end_matches('/'),
                build.builder_id,
                build.build_id
            ),
        }
    }

    pub fn markdown(&self) -> String {
        format!("[{}]({})", self.build_id, self.url)
    }
}

/// One rendered pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub initiator: BuildRef,
    pub browser: String,
    pub uploader: Option<BuildRef>,
    pub duration_minutes: Option<i64>,
    pub duration: String,
}

impl ReportRow {
    pub fn from_pair(base_url: &str, pair: &Pair<'_>) -> Self {
        let initiator = pair.initiator.build;
        let duration_minutes = pair.uploader.and_then(|upload| elapsed_minutes(initiator, upload));

        Self {
            initiator: BuildRef::new(base_url, initiator),
            browser: pair.initiator.browser.to_string(),
            uploader: pair.uploader.map(|upload| BuildRef::new(base_url, upload)),
            duration_minutes,
            duration: duration_minutes
                .map(format_duration)
                .unwrap_or_else(|| NO_DURATION.to_string()),
        }
    }

    /// Markdown table line for this row
    pub fn markdown(&self) -> String {
        let uploader = self
            .uploader
            .as_ref()
            .map(BuildRef::markdown)
            .unwrap_or_else(|| NO_LINK.to_string());

        format!(
            "{} | {} | {} | {}",
            self.initiator.markdown(),
            self.browser,
            uploader,
            self.duration
        )
    }
}

/// Minutes from `initiator` start to `upload` completion
///
/// `None` while the upload is still running, or when the initiator has no
/// start time.
pub fn elapsed_minutes(initiator: &BuildRecord, upload: &BuildRecord) -> Option<i64> {
    let started_at = initiator.started_at?;
    let complete_at = upload.complete_at?;
    Some(round_to_minutes((complete_at - started_at).num_seconds()))
}

/// Round seconds to the nearest minute, halves rounding up
pub fn round_to_minutes(seconds: i64) -> i64 {
    (seconds + 30).div_euclid(60)
}

/// Format minutes as `{hours}h {minutes}s`
///
/// Hours are floored and the remainder keeps the sign of `minutes`, so a
/// negative span of five minutes renders as `-1h -5s`.
pub fn format_duration(minutes: i64) -> String {
    format!("{}h {}s", minutes.div_euclid(60), minutes % 60)
}

/// Pair a loaded build set and turn it into report rows
pub fn generate(base_url: &str, builds: &BuildSet) -> Vec<ReportRow> {
    pairing::pair_builds(&builds.initiator.builds, &builds.uploader.builds)
        .iter()
        .map(|pair| ReportRow::from_pair(base_url, pair))
        .collect()
}

/// Write rows as a markdown table
pub fn write_markdown<W: Write>(out: &mut W, rows: &[ReportRow]) -> std::io::Result<()> {
    for line in HEADER {
        writeln!(out, "{}", line)?;
    }
    for row in rows {
        writeln!(out, "{}", row.markdown())?;
    }
    Ok(())
}

/// Write rows as a pretty-printed JSON array
pub fn write_json<W: Write>(out: &mut W, rows: &[ReportRow]) -> BuildPairResult<()> {
    serde_json::to_writer_pretty(&mut *out, rows)?;
    writeln!(out).map_err(|e| BuildPairError::io("writing report", e))?;
    Ok(())
}
