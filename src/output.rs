//! Output formatting for channel ratings.
//!
//! Renders the ranked list for the console and optionally exports it as CSV.

use anyhow::{Context, Result};
use tracing::debug;

use crate::analyzers::types::{ChannelUsage, RatingReport};
use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;

/// Logs the full rating report using Rust's debug pretty-print format.
pub fn print_pretty(report: &RatingReport) {
    debug!("{:#?}", report);
}

/// Renders the ranked channels as a compact JSON array with one record per line.
///
/// ```text
/// [{"channel":"15","usage":"12.00"},
/// {"channel":"25","usage":"31.50"}]
/// ```
pub fn render_ranked(ranked: &[ChannelUsage]) -> Result<String> {
    let records = ranked
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!("[{}]", records.join(",\n")))
}

/// Writes the ranked channels to a CSV file, replacing any previous content.
pub fn write_csv(path: impl AsRef<Path>, ranked: &[ChannelUsage]) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), rows = ranked.len(), "Writing CSV report");

    let file = File::create(path)
        .with_context(|| format!("failed to create CSV report {}", path.display()))?;

    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for record in ranked {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
