//! Error types for cache store backends.

/// Errors that can occur inside a cache store backend.
///
/// Cache *reads* never produce this error: [`CacheStore::get`] returns
/// `Option` and backends are expected to log read faults internally and
/// report a miss. Writes return this error so callers can log it, but writes
/// are best-effort and a failed write never fails the surrounding operation.
///
/// [`CacheStore::get`]: crate::cache::CacheStore::get
#[derive(Debug, thiserror::Error)]
pub enum CacheStoreError {
    /// The backend failed to persist an entry.
    #[error("Cache backend failure: {details}")]
    Backend {
        /// Description of the failed operation
        details: String,
        /// The underlying backend error, if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CacheStoreError {
    /// Create a `Backend` error with details only.
    pub fn backend(details: impl Into<String>) -> Self {
        CacheStoreError::Backend {
            details: details.into(),
            source: None,
        }
    }

    /// Create a `Backend` error wrapping an underlying error.
    pub fn backend_with_source(
        details: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        CacheStoreError::Backend {
            details: details.into(),
            source: Some(Box::new(source)),
        }
    }
}
