use crate::analyzers::aggregate::HourlyTable;
use crate::analyzers::rank::rank;
use crate::analyzers::types::{HourClock, RatingReport};
use crate::config::RaterConfig;
use crate::parser::FieldPath;
use crate::select::{SnapshotFile, select_snapshots};
use crate::stats::EnergyScan;
use anyhow::Result;
use tracing::{debug, info, warn};

/// Selects the configured snapshots, aggregates them and ranks the channels.
#[tracing::instrument(skip(config), fields(input_dir = %config.input_dir.display()))]
pub fn analyze(config: &RaterConfig) -> Result<RatingReport> {
    let files = select_snapshots(&config.input_dir, config.extension(), config.window())?;
    info!(selected = files.len(), "Snapshots selected");

    analyze_files(&files, &config.field_path, config.clock())
}

/// Aggregates already selected snapshots, in the order given.
///
/// The first unreadable or malformed snapshot aborts the whole run.
pub fn analyze_files(
    files: &[SnapshotFile],
    field_path: &FieldPath,
    clock: HourClock,
) -> Result<RatingReport> {
    let mut table = HourlyTable::new();
    let mut skipped = 0;

    for file in files {
        let Some(scan) = EnergyScan::load(file, field_path)? else {
            debug!(path = %file.path.display(), field_path = %field_path, "No energy scan, skipping");
            skipped += 1;
            continue;
        };

        let hour = clock.hour_of(scan.modified);
        debug!(
            path = %file.path.display(),
            hour,
            channels = scan.channels.len(),
            "Recording energy scan"
        );
        table.record(hour, &scan);
    }

    let hourly = table.hourly_averages();
    let scores = table.channel_scores();
    let ranked = rank(&scores);

    if ranked.is_empty() {
        warn!(selected = files.len(), "No energy scan readings found");
    } else {
        info!(
            selected = files.len(),
            skipped,
            hours = hourly.len(),
            channels = scores.len(),
            "Channel ratings computed"
        );
    }

    Ok(RatingReport {
        selected: files.len(),
        skipped,
        hourly,
        scores,
        ranked,
    })
}
