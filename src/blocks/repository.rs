// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cache-aside accessor for single blocks.

use std::sync::Arc;

use tracing::{debug, warn};

use super::Block;
use crate::cache::CacheStore;
use crate::client::LedgerApi;
use crate::errors::BlockFetchError;

/// Cache-aside accessor for single blocks.
///
/// The read path checks the cache first; on a miss it fetches the raw payload
/// from the upstream API, normalizes it into a [`Block`], writes through to
/// the cache, and returns it. Blocks are cached without expiry: they are
/// content-addressed and immutable, so staleness is impossible.
///
/// Two concurrent callers missing the cache for the same hash will both fetch
/// and both write. That is accepted: block content is deterministic and
/// idempotent to overwrite, so no single-flight lock is held across the fetch.
///
/// # Examples
///
/// ```rust,ignore
/// use chainbytes::{BlockRepository, ClientConfig, HttpLedgerClient};
/// use chainbytes::cache::MemoryCache;
/// use std::sync::Arc;
///
/// let client = HttpLedgerClient::new(ClientConfig::default());
/// let repository = BlockRepository::new(client, Arc::new(MemoryCache::new()));
/// let block = repository.get_block("0000000000000000000050af…").await?;
/// ```
pub struct BlockRepository<A> {
    api: A,
    cache: Arc<dyn CacheStore>,
}

impl<A: LedgerApi> BlockRepository<A> {
    /// Creates a repository over the given API client and cache store.
    pub fn new(api: A, cache: Arc<dyn CacheStore>) -> Self {
        Self { api, cache }
    }

    /// Retrieves a block by hash, from cache when possible.
    ///
    /// On a genuine miss followed by a successful fetch this performs exactly
    /// one cache write; on failure it performs none and propagates the wrapped
    /// upstream error. A corrupt or foreign cache entry is treated as a miss,
    /// not a crash: the block is refetched and the entry overwritten.
    pub async fn get_block(&self, hash: &str) -> Result<Block, BlockFetchError> {
        if let Some(bytes) = self.cache.get(hash).await {
            match serde_json::from_slice::<Block>(&bytes) {
                Ok(block) => {
                    debug!(hash = %hash, "Block served from cache");
                    return Ok(block);
                }
                Err(error) => {
                    warn!(hash = %hash, error = %error, "Corrupt cache entry, treating as miss");
                }
            }
        }

        let raw = self
            .api
            .fetch_block(hash)
            .await
            .map_err(|source| BlockFetchError::upstream(hash, source))?;
        let block = Block::from_raw(raw);

        match serde_json::to_vec(&block) {
            Ok(bytes) => {
                // Best-effort write-through; the fetched block is still returned.
                if let Err(error) = self.cache.set(&block.hash, bytes).await {
                    warn!(hash = %block.hash, error = %error, "Cache write failed");
                }
            }
            Err(error) => {
                warn!(hash = %block.hash, error = %error, "Block serialization failed");
            }
        }

        debug!(
            hash = %block.hash,
            transaction_byte_total = block.transaction_byte_total,
            "Block fetched and cached"
        );
        Ok(block)
    }
}
