// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Append-only ledger analytics with a cache-aside retrieval layer.
//!
//! chainbytes answers two questions about a public block ledger (what does
//! block X contain, and how many transaction-bytes were recorded on day D)
//! without paying a network round trip for every overlapping request:
//!
//! - [`BlockRepository`] retrieves single blocks cache-aside; blocks are
//!   content-addressed and immutable, so they cache forever.
//! - [`DayAggregator`] fans out bounded-concurrency block fetches to total a
//!   day's transaction bytes. Closed days cache forever; the in-progress
//!   day's aggregate carries an adaptive TTL predicted from the day's
//!   observed inter-block intervals.
//! - [`HttpLedgerClient`] owns upstream politeness: retry with exponential
//!   backoff (HTTP 429 and 5xx included), a process-wide in-flight ceiling,
//!   and a shared keep-alive connection pool.
//! - [`ConsumptionReporter`] multiplies byte totals into energy estimates.
//!
//! The cache store and ledger API are traits ([`CacheStore`], [`LedgerApi`]),
//! so backends and transports are substitutable; [`MemoryCache`] and
//! [`NoOpCache`] ship in-crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use chainbytes::{ClientConfig, DayAggregator, HttpLedgerClient};
//! use chainbytes::cache::MemoryCache;
//! use std::sync::Arc;
//!
//! let client = HttpLedgerClient::new(ClientConfig::default());
//! let aggregator = DayAggregator::new(client, Arc::new(MemoryCache::new()));
//!
//! // Total transaction-bytes for the UTC day containing this instant
//! let total = aggregator.transaction_bytes_on_day(1_651_069_845_123).await?;
//! ```

pub mod blocks;
pub mod cache;
pub mod client;
mod consumption;
pub mod days;
pub mod errors;

pub use blocks::{Block, BlockRepository, Transaction};
pub use cache::{CacheStats, CacheStore, MemoryCache, NoOpCache};
pub use client::{
    ClientConfig, DayBlockSummary, HttpLedgerClient, LedgerApi, RawBlock, RawTransaction,
    RetryConfig,
};
pub use consumption::{
    BlockConsumption, ConsumptionReporter, DayConsumption, TransactionConsumption,
};
pub use days::{
    clamp_ttl, predicted_ms_until_next_block, DayAggregate, DayAggregator, DayKey,
    DEFAULT_MIN_TTL, MAX_DAY_TTL,
};
pub use errors::{
    BlockFetchError, CacheStoreError, ChainbytesError, ConsumptionError, DayAggregationError,
    LedgerApiError,
};
