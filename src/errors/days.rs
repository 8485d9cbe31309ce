// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for per-day aggregation.

use super::{BlockFetchError, LedgerApiError};
use crate::days::DayKey;

/// Errors that can occur while aggregating transaction bytes for a day.
///
/// Aggregation is all-or-nothing: if any block in the day's fetch set fails,
/// the whole day fails and no aggregate is written to the cache. The first
/// failing block's error is the one propagated.
#[derive(Debug, thiserror::Error)]
pub enum DayAggregationError {
    /// Failed to list the blocks belonging to the day.
    #[error("Unable to list blocks for day {day}")]
    BlockList {
        /// Canonical key of the day whose block list failed
        day: DayKey,
        /// The underlying API error
        #[source]
        source: LedgerApiError,
    },

    /// At least one block in the day's fetch set failed.
    ///
    /// Carries the first failing block's error; outstanding fetches for the
    /// day are dropped as soon as this occurs.
    #[error("Day aggregation aborted: {0}")]
    Block(#[from] BlockFetchError),
}

impl DayAggregationError {
    /// Create a `BlockList` error for a day.
    pub fn block_list(day: DayKey, source: LedgerApiError) -> Self {
        DayAggregationError::BlockList { day, source }
    }

    /// Returns the upstream HTTP status code behind this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            DayAggregationError::BlockList { source, .. } => source.status_code(),
            DayAggregationError::Block(e) => e.status_code(),
        }
    }
}
