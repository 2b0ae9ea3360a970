use crate::analyzers::types::{ChannelScore, ChannelUsage};
use crate::analyzers::utility::rounded_usage;

/// Orders channels from least to most congested.
///
/// Channels are compared on their two-decimal value; ties keep the order of
/// `scores`.
pub fn rank(scores: &[ChannelScore]) -> Vec<ChannelUsage> {
    let mut ordered: Vec<&ChannelScore> = scores.iter().collect();
    ordered.sort_by(|a, b| rounded_usage(a.score).total_cmp(&rounded_usage(b.score)));

    ordered
        .into_iter()
        .map(|s| ChannelUsage {
            channel: s.channel.clone(),
            usage: s.usage.clone(),
        })
        .collect()
}
