//! Error types for energy consumption reporting.

use super::{BlockFetchError, DayAggregationError};
use crate::days::DayKey;

/// Errors that can occur while producing consumption reports.
///
/// The reporter is a thin multiplier over the aggregation layer, so these
/// variants only add *which* day or block the underlying failure belongs to.
#[derive(Debug, thiserror::Error)]
pub enum ConsumptionError {
    /// Aggregation failed for one of the requested days.
    #[error("Unable to compute consumption for day {day}")]
    Day {
        /// Canonical key of the failing day
        day: DayKey,
        /// The underlying aggregation error
        #[source]
        source: DayAggregationError,
    },

    /// The block behind a per-transaction breakdown could not be fetched.
    #[error("Unable to compute consumption for block {hash}")]
    Block {
        /// Hash of the failing block
        hash: String,
        /// The underlying fetch error
        #[source]
        source: BlockFetchError,
    },
}

impl ConsumptionError {
    /// Create a `Day` error.
    pub fn day(day: DayKey, source: DayAggregationError) -> Self {
        ConsumptionError::Day { day, source }
    }

    /// Create a `Block` error.
    pub fn block(hash: impl Into<String>, source: BlockFetchError) -> Self {
        ConsumptionError::Block {
            hash: hash.into(),
            source,
        }
    }
}
