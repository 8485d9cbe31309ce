// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Energy consumption reporting over the aggregation layer.
//!
//! A thin multiplier: transaction bytes times a constant energy-per-byte
//! factor. All retrieval, caching, and failure discipline lives in
//! [`DayAggregator`] and [`BlockRepository`]; this module only shapes their
//! results for reporting.
//!
//! [`BlockRepository`]: crate::blocks::BlockRepository

use futures::future::try_join_all;

use crate::client::LedgerApi;
use crate::days::{now_ms, DayAggregator, DayKey};
use crate::errors::ConsumptionError;

/// Energy attributed to one calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayConsumption {
    /// Canonical key of the day
    pub day: DayKey,
    /// How many whole days before the current day (0 = today)
    pub days_ago: u32,
    /// Estimated energy for the day's transaction bytes
    pub energy: f64,
}

/// Energy attributed to one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionConsumption {
    /// Transaction hash
    pub hash: String,
    /// Transaction size in bytes
    pub size_bytes: u64,
    /// Estimated energy for this transaction
    pub energy: f64,
}

/// Per-transaction energy breakdown for one block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockConsumption {
    /// Block hash
    pub hash: String,
    /// Estimated energy for the block's transaction bytes
    pub energy: f64,
    /// Per-transaction breakdown, in block order
    pub transactions: Vec<TransactionConsumption>,
}

/// Multiplies transaction-byte counts by a constant energy-per-byte factor.
///
/// # Examples
///
/// ```rust,ignore
/// use chainbytes::{ConsumptionReporter, DayAggregator};
///
/// // 4.56 energy units per transaction byte
/// let reporter = ConsumptionReporter::new(aggregator, 4.56);
/// let last_week = reporter.consumption_for_last_days(7).await?;
/// ```
pub struct ConsumptionReporter<A> {
    aggregator: DayAggregator<A>,
    energy_per_byte: f64,
}

impl<A: LedgerApi + Clone> ConsumptionReporter<A> {
    /// Creates a reporter over the given aggregator.
    pub fn new(aggregator: DayAggregator<A>, energy_per_byte: f64) -> Self {
        Self {
            aggregator,
            energy_per_byte,
        }
    }

    /// The energy-per-byte factor this reporter applies.
    pub fn energy_per_byte(&self) -> f64 {
        self.energy_per_byte
    }

    /// Energy per day for the last `n` calendar days, most recent first.
    ///
    /// Day 0 is the current (in-progress) UTC day. Days are aggregated
    /// concurrently; if any day fails, the whole report fails.
    pub async fn consumption_for_last_days(
        &self,
        n: u32,
    ) -> Result<Vec<DayConsumption>, ConsumptionError> {
        let today = DayKey::from_timestamp_ms(now_ms());

        try_join_all((0..n).map(|days_ago| {
            let day = today.days_ago(days_ago);
            async move {
                let total = self
                    .aggregator
                    .transaction_bytes_on_day(day.as_millis())
                    .await
                    .map_err(|source| ConsumptionError::day(day, source))?;
                Ok(DayConsumption {
                    day,
                    days_ago,
                    energy: total as f64 * self.energy_per_byte,
                })
            }
        }))
        .await
    }

    /// Per-transaction energy breakdown for the block with the given hash.
    pub async fn consumption_per_transaction(
        &self,
        hash: &str,
    ) -> Result<BlockConsumption, ConsumptionError> {
        let block = self
            .aggregator
            .repository()
            .get_block(hash)
            .await
            .map_err(|source| ConsumptionError::block(hash, source))?;

        let transactions = block
            .transactions
            .iter()
            .map(|tx| TransactionConsumption {
                hash: tx.hash.clone(),
                size_bytes: tx.size_bytes,
                energy: tx.size_bytes as f64 * self.energy_per_byte,
            })
            .collect();

        Ok(BlockConsumption {
            hash: block.hash,
            energy: block.transaction_byte_total as f64 * self.energy_per_byte,
            transactions,
        })
    }
}
