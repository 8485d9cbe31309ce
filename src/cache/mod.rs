//! Cache store backends for blocks and day aggregates.
//!
//! This module defines the key/value seam the core writes through:
//!
//! - [`MemoryCache`]: In-memory store with per-entry expiry and optional size limits
//! - [`NoOpCache`]: Disables caching entirely (for testing or specific use cases)
//!
//! Values are opaque byte blobs controlled by the core (serialized blocks and
//! day aggregates); backends never interpret them. The key scheme is part of
//! the deployment contract and must be preserved across implementations:
//! block key = block hash string, day key = decimal string of the day's
//! canonical UTC-midnight epoch-milliseconds.
//!
//! # Examples
//!
//! ```rust,ignore
//! use chainbytes::cache::{MemoryCache, NoOpCache};
//! use chainbytes::BlockRepository;
//! use std::sync::Arc;
//!
//! // Memory cache with a size limit
//! let cache = Arc::new(MemoryCache::new().with_max_entries(10_000));
//! let repository = BlockRepository::new(client, cache);
//!
//! // No cache (always fetch)
//! let repository = BlockRepository::new(client, Arc::new(NoOpCache));
//! ```

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::CacheStoreError;

mod memory;
mod noop;

pub use memory::MemoryCache;
pub use noop::NoOpCache;

/// Statistics about cache performance
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of cache hits (successful retrievals)
    pub hits: u64,
    /// Number of cache misses (key not found)
    pub misses: u64,
    /// Number of entries evicted due to size limits
    pub evictions: u64,
    /// Number of entries expired due to TTL
    pub expirations: u64,
    /// Current number of entries in the cache
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, evictions={}, expirations={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.evictions,
            self.expirations,
            self.entries,
            self.hit_rate()
        )
    }
}

/// Trait for cache store backends.
///
/// Implementations provide different storage strategies (in-memory, Redis,
/// disk). All operations are async to support networked backends.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and support concurrent access. Use
/// interior mutability (e.g., `Mutex`, `RwLock`) as needed. Single-key
/// get/set atomicity is the only synchronization the core relies on.
///
/// # Error Handling
///
/// A miss is control flow, not an error: `get` returns `Option` and a backend
/// read fault should be logged internally and reported as a miss. Writes
/// return `Err` on backend faults, but callers treat caching as best-effort
/// and never fail the surrounding operation on a write error.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Retrieves the value cached under `key`.
    ///
    /// Returns `None` if:
    /// - The key is not in the cache
    /// - The cached entry has expired
    /// - A backend read error occurred (logged internally)
    async fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Stores `value` under `key` with no expiry.
    ///
    /// Used for immutable data (blocks, closed-day aggregates). The entry
    /// lives until the backend's own eviction policy removes it.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), CacheStoreError>;

    /// Stores `value` under `key`, expiring after `ttl`.
    ///
    /// Used for provisional data (the in-progress day's aggregate).
    async fn set_with_expiry(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), CacheStoreError>;

    /// Returns current cache statistics
    async fn stats(&self) -> CacheStats;

    /// Returns a human-readable name for this cache backend
    ///
    /// Used for logging and debugging.
    fn name(&self) -> &'static str;
}
