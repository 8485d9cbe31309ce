// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for single-block retrieval.

use super::LedgerApiError;

/// Errors that can occur while retrieving a single block.
///
/// A cache miss is not an error; it routes the repository to the upstream
/// API. This error means the upstream fetch itself failed, and nothing was
/// written to the cache.
///
/// # Examples
///
/// ```rust,ignore
/// use chainbytes::{BlockRepository, BlockFetchError};
///
/// match repository.get_block(hash).await {
///     Ok(block) => println!("{}", block.transaction_byte_total),
///     Err(BlockFetchError::Upstream { hash, source }) => {
///         eprintln!("unable to get block {hash}: {source}");
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum BlockFetchError {
    /// The upstream ledger API failed to deliver the block.
    #[error("Unable to get block {hash}")]
    Upstream {
        /// Hash of the block that could not be fetched
        hash: String,
        /// The underlying API error
        #[source]
        source: LedgerApiError,
    },
}

impl BlockFetchError {
    /// Create an `Upstream` error for a block hash.
    pub fn upstream(hash: impl Into<String>, source: LedgerApiError) -> Self {
        BlockFetchError::Upstream {
            hash: hash.into(),
            source,
        }
    }

    /// Returns the upstream HTTP status code behind this error, if any.
    ///
    /// Useful for distinguishing rate limiting (429) from other faults.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            BlockFetchError::Upstream { source, .. } => source.status_code(),
        }
    }
}
