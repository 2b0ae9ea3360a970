//! Snapshot discovery: lists a directory and keeps recent files with the
//! configured extension.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A diagnostic file that passed the selection filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    pub path: PathBuf,
    /// Last-modified time, drives both the recency filter and hour bucketing.
    pub modified: DateTime<Utc>,
}

impl SnapshotFile {
    /// Age of the snapshot relative to `now`. Negative for future-dated files.
    pub fn age(&self, now: DateTime<Utc>) -> TimeDelta {
        now - self.modified
    }
}

/// Selects snapshots in `dir` using the current time as the reference point.
///
/// `window` of `None` disables the recency filter.
pub fn select_snapshots(
    dir: impl AsRef<Path>,
    extension: &str,
    window: Option<TimeDelta>,
) -> Result<Vec<SnapshotFile>> {
    select_snapshots_at(dir, extension, window, Utc::now())
}

/// Selects snapshots in `dir` whose extension equals `extension` exactly and
/// whose age at `now` does not exceed `window`.
///
/// The listing is not recursive and its order is whatever the filesystem
/// returns. Entries that are not regular files are skipped.
///
/// # Errors
///
/// Fails if the directory cannot be read or any entry's metadata cannot be
/// looked up.
pub fn select_snapshots_at(
    dir: impl AsRef<Path>,
    extension: &str,
    window: Option<TimeDelta>,
    now: DateTime<Utc>,
) -> Result<Vec<SnapshotFile>> {
    let dir = dir.as_ref();
    let mut selected = Vec::new();

    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read snapshot directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        let path = entry.path();

        let metadata = fs::metadata(&path)
            .with_context(|| format!("failed to read metadata for {}", path.display()))?;
        if !metadata.is_file() {
            continue;
        }

        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }

        let modified: DateTime<Utc> = metadata
            .modified()
            .with_context(|| format!("failed to read modification time of {}", path.display()))?
            .into();

        let snapshot = SnapshotFile { path, modified };

        if let Some(window) = window {
            let age = snapshot.age(now);
            if age > window {
                debug!(
                    path = %snapshot.path.display(),
                    age_minutes = age.num_minutes(),
                    "Snapshot outside recency window"
                );
                continue;
            }
        }

        selected.push(snapshot);
    }

    debug!(dir = %dir.display(), selected = selected.len(), "Snapshot selection complete");
    Ok(selected)
}
