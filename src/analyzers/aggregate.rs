use crate::analyzers::types::ChannelScore;
use crate::analyzers::utility::{format_usage, mean};
use crate::stats::EnergyScan;
use std::collections::{BTreeMap, HashMap};

/// Running sum and sample count of one (hour, channel) cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Cell {
    sum: f64,
    count: u32,
}

impl Cell {
    fn average(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Two-level accumulator of channel readings keyed by hour of day.
///
/// Cells are created on first contribution, so every stored cell has a
/// count of at least one. Channels remember the order in which they were
/// first seen; all derived views list channels in that order.
#[derive(Debug, Clone, Default)]
pub struct HourlyTable {
    buckets: BTreeMap<u8, HashMap<String, Cell>>,
    channels: Vec<String>,
}

impl HourlyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single reading to the `(hour, channel)` cell.
    pub fn add(&mut self, hour: u8, channel: &str, value: f64) {
        if !self.channels.iter().any(|c| c == channel) {
            self.channels.push(channel.to_string());
        }

        let cell = self
            .buckets
            .entry(hour)
            .or_default()
            .entry(channel.to_string())
            .or_default();
        cell.sum += value;
        cell.count += 1;
    }

    /// Adds every reading of `scan` to the bucket for `hour`.
    pub fn record(&mut self, hour: u8, scan: &EnergyScan) {
        for (channel, value) in &scan.channels {
            self.add(hour, channel, *value);
        }
    }

    /// Folds `other` into `self`.
    ///
    /// Cell sums and counts add up, so merging partial tables gives the same
    /// averages as recording every snapshot into one table. Channels new to
    /// `self` are appended in `other`'s encounter order.
    pub fn merge(&mut self, other: HourlyTable) {
        for channel in other.channels {
            if !self.channels.contains(&channel) {
                self.channels.push(channel);
            }
        }

        for (hour, cells) in other.buckets {
            let bucket = self.buckets.entry(hour).or_default();
            for (channel, cell) in cells {
                let target = bucket.entry(channel).or_default();
                target.sum += cell.sum;
                target.count += cell.count;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Populated hours, ascending.
    pub fn hours(&self) -> impl Iterator<Item = u8> + '_ {
        self.buckets.keys().copied()
    }

    /// Channels in first-encounter order.
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// Number of readings recorded for `channel` during `hour`.
    pub fn sample_count(&self, hour: u8, channel: &str) -> u32 {
        self.buckets
            .get(&hour)
            .and_then(|cells| cells.get(channel))
            .map_or(0, |cell| cell.count)
    }

    /// Average reading of every populated `(hour, channel)` cell.
    pub fn hourly_averages(&self) -> BTreeMap<u8, Vec<(String, f64)>> {
        self.buckets
            .iter()
            .map(|(hour, cells)| {
                let averages = self
                    .channels
                    .iter()
                    .filter_map(|channel| {
                        cells
                            .get(channel)
                            .map(|cell| (channel.clone(), cell.average()))
                    })
                    .collect();
                (*hour, averages)
            })
            .collect()
    }

    /// Per-channel mean of the hourly averages.
    ///
    /// Each hour in which a channel was seen weighs the same no matter how
    /// many readings fell into it.
    pub fn channel_scores(&self) -> Vec<ChannelScore> {
        self.channels
            .iter()
            .filter_map(|channel| {
                let hourly: Vec<f64> = self
                    .buckets
                    .values()
                    .filter_map(|cells| cells.get(channel).map(Cell::average))
                    .collect();

                if hourly.is_empty() {
                    return None;
                }

                let score = mean(&hourly);
                Some(ChannelScore {
                    channel: channel.clone(),
                    score,
                    usage: format_usage(score),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn scan(readings: &[(&str, f64)]) -> EnergyScan {
        let modified: DateTime<Utc> = "2024-05-01T10:00:00Z".parse().unwrap();
        EnergyScan {
            modified,
            channels: readings
                .iter()
                .map(|(c, v)| (c.to_string(), *v))
                .collect(),
        }
    }

    fn usage_of(table: &HourlyTable, channel: &str) -> String {
        table
            .channel_scores()
            .into_iter()
            .find(|s| s.channel == channel)
            .map(|s| s.usage)
            .unwrap()
    }

    #[test]
    fn test_empty_table() {
        let table = HourlyTable::new();
        assert!(table.is_empty());
        assert!(table.hourly_averages().is_empty());
        assert!(table.channel_scores().is_empty());
    }

    #[test]
    fn test_empty_scan_creates_no_bucket() {
        let mut table = HourlyTable::new();
        table.record(9, &scan(&[]));
        assert!(table.is_empty());
        assert_eq!(table.hours().count(), 0);
    }

    #[test]
    fn test_hourly_average_is_mean_of_bucket() {
        let mut table = HourlyTable::new();
        table.record(14, &scan(&[("11", 10.0)]));
        table.record(14, &scan(&[("11", 30.0)]));
        table.record(14, &scan(&[("11", 50.0)]));
        table.record(15, &scan(&[("11", 100.0)]));

        let hourly = table.hourly_averages();
        assert_eq!(hourly[&14], vec![("11".to_string(), 30.0)]);
        assert_eq!(hourly[&15], vec![("11".to_string(), 100.0)]);
        assert_eq!(table.sample_count(14, "11"), 3);
        assert_eq!(table.sample_count(15, "11"), 1);
        assert_eq!(table.sample_count(16, "11"), 0);
    }

    #[test]
    fn test_repeated_samples_in_one_hour_do_not_dominate() {
        let mut table = HourlyTable::new();
        for _ in 0..4 {
            table.record(14, &scan(&[("11", 10.0)]));
        }
        table.record(9, &scan(&[("15", 10.0)]));
        table.record(10, &scan(&[("15", 20.0)]));

        assert_eq!(usage_of(&table, "11"), "10.00");
        assert_eq!(usage_of(&table, "15"), "15.00");
    }

    #[test]
    fn test_hours_weigh_equally() {
        let mut table = HourlyTable::new();
        for _ in 0..50 {
            table.record(20, &scan(&[("25", 80.0)]));
        }
        table.record(8, &scan(&[("25", 20.0)]));

        // (80 + 20) / 2, not (50 * 80 + 20) / 51
        assert_eq!(usage_of(&table, "25"), "50.00");
    }

    #[test]
    fn test_shared_hour_end_to_end_values() {
        let mut table = HourlyTable::new();
        table.record(10, &scan(&[("11", 10.0), ("15", 20.0)]));
        table.record(10, &scan(&[("11", 30.0)]));

        let scores = table.channel_scores();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].channel, "11");
        assert_eq!(scores[0].usage, "20.00");
        assert_eq!(scores[1].channel, "15");
        assert_eq!(scores[1].usage, "20.00");
    }

    #[test]
    fn test_channels_keep_first_encounter_order() {
        let mut table = HourlyTable::new();
        table.record(23, &scan(&[("20", 1.0), ("11", 1.0)]));
        table.record(1, &scan(&[("15", 1.0), ("11", 1.0)]));

        assert_eq!(table.channels(), ["20", "11", "15"]);

        let order: Vec<String> = table.channel_scores().into_iter().map(|s| s.channel).collect();
        assert_eq!(order, vec!["20", "11", "15"]);

        let hourly = table.hourly_averages();
        let hour_one: Vec<&str> = hourly[&1].iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(hour_one, vec!["11", "15"]);
    }

    #[test]
    fn test_merge_matches_sequential_recording() {
        let scans = [
            (10, scan(&[("11", 10.0), ("15", 5.0)])),
            (10, scan(&[("11", 30.0)])),
            (11, scan(&[("15", 25.0), ("20", 3.0)])),
            (12, scan(&[("11", 7.0)])),
        ];

        let mut sequential = HourlyTable::new();
        for (hour, s) in &scans {
            sequential.record(*hour, s);
        }

        let mut left = HourlyTable::new();
        let mut right = HourlyTable::new();
        for (i, (hour, s)) in scans.iter().enumerate() {
            if i % 2 == 0 {
                left.record(*hour, s);
            } else {
                right.record(*hour, s);
            }
        }
        left.merge(right);

        assert_eq!(left.hourly_averages(), sequential.hourly_averages());
        assert_eq!(left.channel_scores(), sequential.channel_scores());
        assert_eq!(left.sample_count(10, "11"), 2);
    }

    #[test]
    fn test_merge_appends_new_channels() {
        let mut table = HourlyTable::new();
        table.record(5, &scan(&[("15", 1.0)]));

        let mut other = HourlyTable::new();
        other.record(6, &scan(&[("26", 2.0), ("15", 3.0)]));

        table.merge(other);
        assert_eq!(table.channels(), ["15", "26"]);
        assert_eq!(table.hours().collect::<Vec<_>>(), vec![5, 6]);
    }
}
