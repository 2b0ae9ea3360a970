use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fs;
use tracing::trace;

use crate::parser::{FieldPath, nested_value, parse_snapshot};
use crate::select::SnapshotFile;

/// Per-channel energy readings taken from a single snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyScan {
    pub modified: DateTime<Utc>,
    /// Channel id and reading, in document order.
    pub channels: Vec<(String, f64)>,
}

impl EnergyScan {
    /// Extracts the channel map found at `path` in `doc`.
    ///
    /// Returns `None` when the path does not resolve to a JSON object; such a
    /// snapshot contributes nothing. Channel entries whose value is not a
    /// number are dropped on their own.
    pub fn from_snapshot(doc: &Value, path: &FieldPath, modified: DateTime<Utc>) -> Option<Self> {
        let map = nested_value(doc, path)?.as_object()?;

        let channels = map
            .iter()
            .filter_map(|(channel, value)| match value.as_f64() {
                Some(v) => Some((channel.clone(), v)),
                None => {
                    trace!(channel = %channel, %value, "Ignoring non-numeric channel reading");
                    None
                }
            })
            .collect();

        Some(EnergyScan { modified, channels })
    }

    /// Reads, parses and extracts one snapshot file.
    ///
    /// `Ok(None)` means the file parsed but carries no energy scan.
    pub fn load(file: &SnapshotFile, path: &FieldPath) -> Result<Option<Self>> {
        let bytes = fs::read(&file.path)
            .with_context(|| format!("failed to read snapshot {}", file.path.display()))?;
        let doc = parse_snapshot(&bytes)
            .with_context(|| format!("failed to parse snapshot {}", file.path.display()))?;

        Ok(Self::from_snapshot(&doc, path, file.modified))
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
