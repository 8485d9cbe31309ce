// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory cache implementation with per-entry expiry and size limits

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

use super::{CacheStats, CacheStore};
use crate::errors::CacheStoreError;

/// Entry in the memory cache with metadata
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached bytes
    value: Vec<u8>,
    /// Deadline after which the entry no longer exists; `None` = no expiry
    expires_at: Option<Instant>,
    /// When this entry was last accessed (for LRU eviction)
    last_accessed: Instant,
    /// Sequence number for deterministic LRU ordering when instants are equal
    access_seq: u64,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>, access_seq: u64) -> Self {
        let now = Instant::now();
        Self {
            value,
            expires_at: ttl.map(|ttl| now + ttl),
            last_accessed: now,
            access_seq,
        }
    }

    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    fn touch(&mut self, access_seq: u64) {
        self.last_accessed = Instant::now();
        self.access_seq = access_seq;
    }
}

/// Internal state for memory cache
#[derive(Debug, Default)]
struct MemoryCacheState {
    /// The cache entries
    entries: HashMap<String, CacheEntry>,
    /// Cache statistics
    stats: CacheStats,
    /// Sequence counter for deterministic LRU ordering
    next_seq: u64,
}

/// In-memory cache with per-entry expiry and optional size limits
///
/// This store keeps entries in a HashMap. It supports:
/// - Per-entry expiry, driven by the caller through
///   [`CacheStore::set_with_expiry`]
/// - Optional size limits with LRU (least recently used) eviction
/// - Thread-safe concurrent access
///
/// # Examples
///
/// ```rust,ignore
/// use chainbytes::cache::MemoryCache;
///
/// // Unbounded cache (no limits)
/// let cache = MemoryCache::new();
///
/// // Cache with size limit
/// let cache = MemoryCache::new().with_max_entries(10_000);
/// ```
///
/// # Performance
///
/// - Get: O(1) average case (HashMap lookup)
/// - Insert: O(1) without eviction, O(n) with eviction (finds LRU)
#[derive(Debug)]
pub struct MemoryCache {
    max_entries: Option<usize>,
    state: Mutex<MemoryCacheState>,
}

impl MemoryCache {
    /// Creates a new memory cache with no limits
    pub fn new() -> Self {
        Self {
            max_entries: None,
            state: Mutex::new(MemoryCacheState::default()),
        }
    }

    /// Sets the maximum number of entries in the cache
    ///
    /// When the limit is reached, the least recently used (LRU) entry will be
    /// evicted to make room for new entries.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Evicts the least recently used entry from the cache
    fn evict_lru(state: &mut MemoryCacheState) {
        if state.entries.is_empty() {
            return;
        }

        // Find the least recently used entry (by instant, then by sequence)
        let lru_key = state
            .entries
            .iter()
            .min_by_key(|(_, entry)| (entry.last_accessed, entry.access_seq))
            .map(|(key, _)| key.clone());

        if let Some(key) = lru_key {
            debug!(key = %key, "Evicting LRU cache entry");
            state.entries.remove(&key);
            state.stats.evictions += 1;
        }
    }

    async fn insert(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), CacheStoreError> {
        let mut state = self.state.lock().await;

        // Check if we need to evict before inserting
        if let Some(max_entries) = self.max_entries {
            while state.entries.len() >= max_entries && !state.entries.contains_key(key) {
                Self::evict_lru(&mut state);
            }
        }

        debug!(key = %key, ttl_ms = ttl.map(|t| t.as_millis()), "Inserting entry into memory cache");
        let seq = state.next_seq;
        state.next_seq = state.next_seq.wrapping_add(1);
        state
            .entries
            .insert(key.to_string(), CacheEntry::new(value, ttl, seq));
        state.stats.entries = state.entries.len();

        Ok(())
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut state = self.state.lock().await;

        let seq = state.next_seq;

        let result = if let Some(entry) = state.entries.get_mut(key) {
            if entry.is_expired() {
                debug!(key = %key, "Cache entry expired");
                state.entries.remove(key);
                state.stats.expirations += 1;
                state.stats.entries = state.entries.len();
                None
            } else {
                entry.touch(seq);
                let value = entry.value.clone();
                state.next_seq = state.next_seq.wrapping_add(1);
                Some(value)
            }
        } else {
            None
        };

        if result.is_some() {
            state.stats.hits += 1;
            debug!(key = %key, "Cache hit (memory)");
        } else {
            state.stats.misses += 1;
            debug!(key = %key, "Cache miss (memory)");
        }

        result
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), CacheStoreError> {
        self.insert(key, value, None).await
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), CacheStoreError> {
        self.insert(key, value, Some(ttl)).await
    }

    async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        state.stats.clone()
    }

    fn name(&self) -> &'static str {
        "MemoryCache"
    }
}
