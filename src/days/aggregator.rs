// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-day transaction-byte aggregation with adaptive caching.

use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::key::DayKey;
use super::now_ms;
use super::predictor::predicted_ms_until_next_block;
use super::ttl::{clamp_ttl, DEFAULT_MIN_TTL};
use crate::blocks::BlockRepository;
use crate::cache::CacheStore;
use crate::client::LedgerApi;
use crate::errors::DayAggregationError;

/// The cached aggregate for one calendar day.
///
/// Once a day has closed, its aggregate is permanently correct; while the day
/// is in progress the value is a point-in-time snapshot valid until its TTL
/// expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAggregate {
    /// Total transaction bytes recorded on the day
    pub total_transaction_bytes: u64,
}

/// Computes total transaction-bytes per calendar day, cache-aside.
///
/// On a cache miss the aggregator lists the day's blocks and fans out one
/// fetch per hash through the [`BlockRepository`]. The fan-out is bounded
/// only by the ledger client's own in-flight ceiling; the aggregator places
/// no additional cap. Aggregation is all-or-nothing: any failed block fetch
/// aborts the day and nothing is cached, so a partial total can never become
/// cacheable.
///
/// A closed day is cached without expiry. The current day's aggregate gets a
/// TTL predicted from the day's observed inter-block intervals (see
/// [`predicted_ms_until_next_block`] and [`clamp_ttl`]).
///
/// # Examples
///
/// ```rust,ignore
/// use chainbytes::{ClientConfig, DayAggregator, HttpLedgerClient};
/// use chainbytes::cache::MemoryCache;
/// use std::sync::Arc;
///
/// let client = HttpLedgerClient::new(ClientConfig::default());
/// let aggregator = DayAggregator::new(client, Arc::new(MemoryCache::new()));
/// let total = aggregator.transaction_bytes_on_day(1_651_069_845_123).await?;
/// ```
pub struct DayAggregator<A> {
    api: A,
    repository: Arc<BlockRepository<A>>,
    cache: Arc<dyn CacheStore>,
    min_ttl: Duration,
}

impl<A: LedgerApi + Clone> DayAggregator<A> {
    /// Creates an aggregator over the given API client and cache store.
    ///
    /// The aggregator builds its own [`BlockRepository`] sharing the same
    /// client and cache, so per-block lookups hit the same block cache
    /// entries as direct repository callers.
    pub fn new(api: A, cache: Arc<dyn CacheStore>) -> Self {
        let repository = Arc::new(BlockRepository::new(api.clone(), cache.clone()));
        Self {
            api,
            repository,
            cache,
            min_ttl: DEFAULT_MIN_TTL,
        }
    }

    /// Sets the TTL floor for the in-progress day's cached aggregate.
    #[must_use]
    pub fn with_min_ttl(mut self, min_ttl: Duration) -> Self {
        self.min_ttl = min_ttl;
        self
    }

    /// The block repository backing this aggregator.
    pub fn repository(&self) -> Arc<BlockRepository<A>> {
        self.repository.clone()
    }

    /// Total transaction-bytes recorded on the calendar day containing
    /// `timestamp_ms`.
    ///
    /// A cache hit returns the stored total directly, with zero upstream
    /// calls, whether or not the day is still in progress.
    pub async fn transaction_bytes_on_day(
        &self,
        timestamp_ms: i64,
    ) -> Result<u64, DayAggregationError> {
        let day = DayKey::from_timestamp_ms(timestamp_ms);
        let key = day.to_string();

        if let Some(bytes) = self.cache.get(&key).await {
            match serde_json::from_slice::<DayAggregate>(&bytes) {
                Ok(aggregate) => {
                    debug!(day = %day, "Day aggregate served from cache");
                    return Ok(aggregate.total_transaction_bytes);
                }
                Err(error) => {
                    warn!(day = %day, error = %error, "Corrupt cache entry, treating as miss");
                }
            }
        }

        let summaries = self
            .api
            .fetch_blocks_for_day(day)
            .await
            .map_err(|source| DayAggregationError::block_list(day, source))?;

        debug!(day = %day, blocks = summaries.len(), "Fanning out block fetches");

        // First failure aborts the whole day; outstanding fetches are dropped
        // and nothing is cached, so an undercounted total can never stick.
        let blocks = try_join_all(
            summaries
                .iter()
                .map(|summary| self.repository.get_block(&summary.hash)),
        )
        .await?;

        let total: u64 = blocks.iter().map(|b| b.transaction_byte_total).sum();

        // The day is in progress iff it is the current UTC calendar day.
        // Comparing keys, not raw instants: `day > now` would misclassify
        // today once the clock has passed its midnight.
        let in_progress = DayKey::from_timestamp_ms(now_ms()) == day;

        let aggregate = DayAggregate {
            total_transaction_bytes: total,
        };
        match serde_json::to_vec(&aggregate) {
            Ok(bytes) => {
                // Best-effort; the computed total is returned either way.
                let write = if in_progress {
                    let timestamps: Vec<i64> = blocks.iter().map(|b| b.timestamp_sec).collect();
                    let predicted = predicted_ms_until_next_block(now_ms(), &timestamps);
                    let ttl = clamp_ttl(predicted, self.min_ttl);
                    debug!(
                        day = %day,
                        total,
                        ttl_ms = ttl.as_millis(),
                        "Caching in-progress day aggregate"
                    );
                    self.cache.set_with_expiry(&key, bytes, ttl).await
                } else {
                    debug!(day = %day, total, "Caching closed day aggregate");
                    self.cache.set(&key, bytes).await
                };
                if let Err(error) = write {
                    warn!(day = %day, error = %error, "Cache write failed");
                }
            }
            Err(error) => {
                warn!(day = %day, error = %error, "Aggregate serialization failed");
            }
        }

        Ok(total)
    }
}
