// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for chainbytes integration tests
//!
//! Provides mock implementations of the [`LedgerApi`] and [`CacheStore`]
//! seams so cache-aside and aggregation behavior can be tested without a
//! real upstream service: the mock API counts every call it receives, and
//! the recording cache captures every write together with its TTL.

// Each test binary compiles this module independently and uses a subset.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chainbytes::cache::MemoryCache;
use chainbytes::{
    CacheStats, CacheStore, CacheStoreError, DayBlockSummary, DayKey, LedgerApi, LedgerApiError,
    RawBlock, RawTransaction,
};

/// Mock LedgerApi with canned responses and call counters
///
/// # Example
///
/// ```rust,ignore
/// let api = Arc::new(
///     MockLedgerApi::new()
///         .with_block(raw_block("aa", 100, 1_000, &[250, 400]))
///         .with_failing_block("bb", 500)
///         .with_day(day, vec![summary("aa", 100)]),
/// );
/// assert_eq!(api.block_fetches(), 0);
/// ```
pub struct MockLedgerApi {
    blocks: HashMap<String, RawBlock>,
    failing_blocks: HashMap<String, u16>,
    days: HashMap<DayKey, Vec<DayBlockSummary>>,
    failing_days: HashMap<DayKey, u16>,
    block_fetches: AtomicUsize,
    day_fetches: AtomicUsize,
}

impl MockLedgerApi {
    /// Create a mock with no canned responses; every fetch fails with 404.
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
            failing_blocks: HashMap::new(),
            days: HashMap::new(),
            failing_days: HashMap::new(),
            block_fetches: AtomicUsize::new(0),
            day_fetches: AtomicUsize::new(0),
        }
    }

    /// Serve this raw block for its own hash.
    pub fn with_block(mut self, block: RawBlock) -> Self {
        self.blocks.insert(block.hash.clone(), block);
        self
    }

    /// Fail fetches of this hash with the given HTTP status.
    pub fn with_failing_block(mut self, hash: impl Into<String>, status: u16) -> Self {
        self.failing_blocks.insert(hash.into(), status);
        self
    }

    /// Serve this listing for the given day.
    pub fn with_day(mut self, day: DayKey, summaries: Vec<DayBlockSummary>) -> Self {
        self.days.insert(day, summaries);
        self
    }

    /// Fail listings of this day with the given HTTP status.
    pub fn with_failing_day(mut self, day: DayKey, status: u16) -> Self {
        self.failing_days.insert(day, status);
        self
    }

    /// Number of `fetch_block` calls received so far.
    pub fn block_fetches(&self) -> usize {
        self.block_fetches.load(Ordering::SeqCst)
    }

    /// Number of `fetch_blocks_for_day` calls received so far.
    pub fn day_fetches(&self) -> usize {
        self.day_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerApi for MockLedgerApi {
    async fn fetch_block(&self, hash: &str) -> Result<RawBlock, LedgerApiError> {
        self.block_fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = self.failing_blocks.get(hash) {
            return Err(LedgerApiError::Status {
                status: *status,
                url: format!("mock://rawblock/{hash}"),
            });
        }
        self.blocks
            .get(hash)
            .cloned()
            .ok_or_else(|| LedgerApiError::Status {
                status: 404,
                url: format!("mock://rawblock/{hash}"),
            })
    }

    async fn fetch_blocks_for_day(
        &self,
        day: DayKey,
    ) -> Result<Vec<DayBlockSummary>, LedgerApiError> {
        self.day_fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = self.failing_days.get(&day) {
            return Err(LedgerApiError::Status {
                status: *status,
                url: format!("mock://blocks/{day}"),
            });
        }
        self.days
            .get(&day)
            .cloned()
            .ok_or_else(|| LedgerApiError::Status {
                status: 404,
                url: format!("mock://blocks/{day}"),
            })
    }
}

/// One captured cache write.
#[derive(Debug, Clone)]
pub struct SetEvent {
    pub key: String,
    /// `None` for a plain `set`, the TTL for `set_with_expiry`
    pub ttl: Option<Duration>,
}

/// Cache store that records every write alongside a working memory backend
pub struct RecordingCache {
    inner: MemoryCache,
    writes: Mutex<Vec<SetEvent>>,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self {
            inner: MemoryCache::new(),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// All writes captured so far, in order.
    pub fn writes(&self) -> Vec<SetEvent> {
        self.writes.lock().unwrap().clone()
    }

    /// The writes captured for one key.
    pub fn writes_for(&self, key: &str) -> Vec<SetEvent> {
        self.writes()
            .into_iter()
            .filter(|event| event.key == key)
            .collect()
    }

    /// Plant raw bytes under a key, bypassing write recording.
    pub async fn plant(&self, key: &str, value: Vec<u8>) {
        self.inner.set(key, value).await.unwrap();
    }

    fn record(&self, key: &str, ttl: Option<Duration>) {
        self.writes.lock().unwrap().push(SetEvent {
            key: key.to_string(),
            ttl,
        });
    }
}

#[async_trait]
impl CacheStore for RecordingCache {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), CacheStoreError> {
        self.record(key, None);
        self.inner.set(key, value).await
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), CacheStoreError> {
        self.record(key, Some(ttl));
        self.inner.set_with_expiry(key, value, ttl).await
    }

    async fn stats(&self) -> CacheStats {
        self.inner.stats().await
    }

    fn name(&self) -> &'static str {
        "RecordingCache"
    }
}

/// Helper to create a raw block whose transactions have the given sizes
pub fn raw_block(hash: &str, time: i64, size: u64, tx_sizes: &[u64]) -> RawBlock {
    let tx = tx_sizes
        .iter()
        .enumerate()
        .map(|(i, tx_size)| RawTransaction {
            hash: format!("{hash}-tx{i}"),
            size: *tx_size,
        })
        .collect();
    RawBlock {
        hash: hash.to_string(),
        prev_block: format!("{hash}-prev"),
        next_block: vec![],
        size,
        tx,
        time,
    }
}

/// Helper to create a day-listing entry
pub fn summary(hash: &str, time: i64) -> DayBlockSummary {
    DayBlockSummary {
        hash: hash.to_string(),
        time,
        block_index: 0,
        height: 0,
    }
}

/// Current wall-clock time as epoch-milliseconds.
pub fn wall_clock_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}
