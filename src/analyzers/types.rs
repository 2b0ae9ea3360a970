//! Data types used by the aggregation pipeline.

use chrono::{DateTime, Local, Timelike, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Time zone used to turn a modification time into an hour bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HourClock {
    /// Wall-clock hour of the running process.
    #[default]
    Local,
    Utc,
}

impl HourClock {
    /// Hour of day (0-23) of `at` in this clock's time zone.
    pub fn hour_of(self, at: DateTime<Utc>) -> u8 {
        let hour = match self {
            HourClock::Local => at.with_timezone(&Local).hour(),
            HourClock::Utc => at.hour(),
        };
        hour as u8
    }
}

/// Final hour-weighted score of one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelScore {
    pub channel: String,
    pub score: f64,
    /// `score` rendered with two decimals.
    pub usage: String,
}

/// A single record of the ranked output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelUsage {
    pub channel: String,
    pub usage: String,
}

/// Everything a rating run produces.
#[derive(Debug, Default)]
pub struct RatingReport {
    /// Snapshots that passed selection.
    pub selected: usize,
    /// Selected snapshots without an energy scan.
    pub skipped: usize,
    /// Per-hour channel averages, hours ascending.
    pub hourly: BTreeMap<u8, Vec<(String, f64)>>,
    /// Scores in first-encounter channel order.
    pub scores: Vec<ChannelScore>,
    /// Scores sorted from least to most congested.
    pub ranked: Vec<ChannelUsage>,
}
