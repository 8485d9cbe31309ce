//! Error types for the chainbytes library.
//!
//! This module provides strongly-typed errors for all public APIs in chainbytes.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling
//!   (`BlockFetchError`, `DayAggregationError`, etc.)
//! - **Unified error type** (`ChainbytesError`) for convenience when you don't
//!   need to distinguish between error sources
//!
//! # Architecture
//!
//! Each major module has its own error type:
//! - [`LedgerApiError`] - Failures talking to the upstream ledger API
//! - [`CacheStoreError`] - Failures inside a cache store backend
//! - [`BlockFetchError`] - Errors from single-block retrieval
//! - [`DayAggregationError`] - Errors from per-day aggregation
//! - [`ConsumptionError`] - Errors from energy consumption reporting
//!
//! A cache miss is deliberately *not* an error anywhere in this crate: cache
//! reads return `Option` and a miss is ordinary control flow. Error values are
//! reserved for upstream fetch failures, payload validation failures, and
//! backend faults.
//!
//! # Examples
//!
//! ## Fine-grained error handling
//!
//! ```rust,ignore
//! use chainbytes::{BlockRepository, BlockFetchError};
//!
//! match repository.get_block(hash).await {
//!     Ok(block) => println!("{} tx bytes", block.transaction_byte_total),
//!     Err(e) if e.status_code() == Some(429) => {
//!         eprintln!("rate limited even after retries: {e}");
//!     }
//!     Err(e) => eprintln!("fetch failed: {e}"),
//! }
//! ```
//!
//! ## Using the unified error type
//!
//! ```rust,ignore
//! use chainbytes::ChainbytesError;
//!
//! async fn example() -> Result<(), ChainbytesError> {
//!     let total = aggregator.transaction_bytes_on_day(day_ms).await?;
//!     // Module errors convert to ChainbytesError via From implementations
//!     Ok(())
//! }
//! ```

mod blocks;
mod cache;
mod client;
mod consumption;
mod days;

pub use blocks::BlockFetchError;
pub use cache::CacheStoreError;
pub use client::LedgerApiError;
pub use consumption::ConsumptionError;
pub use days::DayAggregationError;

/// Unified error type for all chainbytes operations.
///
/// This enum wraps all module-specific error types, providing a convenient way
/// to handle errors when you don't need to distinguish between error sources.
///
/// All module-specific error types automatically convert to `ChainbytesError`
/// via `From` implementations, so you can use `?` to propagate errors
/// naturally.
#[derive(Debug, thiserror::Error)]
pub enum ChainbytesError {
    /// Error from the upstream ledger API client.
    #[error("Ledger API error: {0}")]
    LedgerApi(#[from] LedgerApiError),

    /// Error from a cache store backend.
    #[error("Cache store error: {0}")]
    CacheStore(#[from] CacheStoreError),

    /// Error from single-block retrieval.
    #[error("Block fetch error: {0}")]
    BlockFetch(#[from] BlockFetchError),

    /// Error from per-day aggregation.
    #[error("Day aggregation error: {0}")]
    DayAggregation(#[from] DayAggregationError),

    /// Error from energy consumption reporting.
    #[error("Consumption error: {0}")]
    Consumption(#[from] ConsumptionError),
}
