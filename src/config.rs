use crate::analyzers::types::HourClock;
use crate::parser::FieldPath;
use chrono::TimeDelta;
use clap::Args;
use std::path::PathBuf;

/// Settings shared by every command, read once at startup.
#[derive(Debug, Clone, Args)]
pub struct RaterConfig {
    /// Directory containing the diagnostic JSON files
    #[arg(short, long, default_value = "input")]
    pub input_dir: PathBuf,

    /// Ignore files older than this many hours (0 = include all files)
    #[arg(short, long, default_value_t = 24.0)]
    pub window_hours: f64,

    /// File extension of snapshot files, with or without the leading dot
    #[arg(short, long, default_value = "json")]
    pub extension: String,

    /// Dot-separated location of the channel map inside each snapshot
    #[arg(short, long, default_value_t = FieldPath::default())]
    pub field_path: FieldPath,

    /// Bucket samples by UTC hour instead of local time
    #[arg(long, default_value_t = false)]
    pub utc: bool,
}

impl Default for RaterConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            window_hours: 24.0,
            extension: "json".to_string(),
            field_path: FieldPath::default(),
            utc: false,
        }
    }
}

impl RaterConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.input_dir.as_os_str().is_empty(),
            "input-dir must be non-empty"
        );
        anyhow::ensure!(
            self.window_hours.is_finite() && self.window_hours >= 0.0,
            "window-hours must be a non-negative number, got {}",
            self.window_hours
        );
        anyhow::ensure!(
            !self.extension().is_empty(),
            "extension must be non-empty, got {:?}",
            self.extension
        );
        anyhow::ensure!(
            self.field_path.segments().iter().all(|s| !s.is_empty()),
            "field-path must not contain empty segments, got {}",
            self.field_path
        );
        Ok(())
    }

    /// Extension without its leading dot.
    pub fn extension(&self) -> &str {
        self.extension.strip_prefix('.').unwrap_or(&self.extension)
    }

    /// Recency window, `None` when filtering is disabled.
    pub fn window(&self) -> Option<TimeDelta> {
        if self.window_hours <= 0.0 {
            return None;
        }
        let millis = (self.window_hours * 3_600_000.0).round() as i64;
        Some(TimeDelta::milliseconds(millis))
    }

    pub fn clock(&self) -> HourClock {
        if self.utc {
            HourClock::Utc
        } else {
            HourClock::Local
        }
    }
}
