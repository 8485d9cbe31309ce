//! No-operation cache that disables caching entirely

use async_trait::async_trait;
use std::time::Duration;

use super::{CacheStats, CacheStore};
use crate::errors::CacheStoreError;

/// A no-operation cache that disables caching entirely
///
/// This backend always returns `None` for reads and ignores writes. Use this
/// when you want to disable caching for testing or specific scenarios where
/// caching is not desired; every block and day aggregate will be refetched
/// from the upstream API.
///
/// # Examples
///
/// ```rust,ignore
/// use chainbytes::cache::NoOpCache;
/// use chainbytes::BlockRepository;
/// use std::sync::Arc;
///
/// let repository = BlockRepository::new(client, Arc::new(NoOpCache));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCache;

#[async_trait]
impl CacheStore for NoOpCache {
    async fn get(&self, _key: &str) -> Option<Vec<u8>> {
        // Always return None (cache miss)
        None
    }

    async fn set(&self, _key: &str, _value: Vec<u8>) -> Result<(), CacheStoreError> {
        Ok(())
    }

    async fn set_with_expiry(
        &self,
        _key: &str,
        _value: Vec<u8>,
        _ttl: Duration,
    ) -> Result<(), CacheStoreError> {
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        CacheStats::default()
    }

    fn name(&self) -> &'static str {
        "NoOpCache"
    }
}
