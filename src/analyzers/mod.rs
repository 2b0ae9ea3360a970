//! Channel congestion aggregation and ranking.
//!
//! This module buckets energy scan readings by hour of day, averages each
//! bucket, averages the buckets per channel and ranks the channels from
//! least to most congested.

pub mod aggregate;
pub mod analyzer;
pub mod rank;
pub mod types;
pub mod utility;
