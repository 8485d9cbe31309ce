// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block domain types and normalization.
//!
//! Blocks are immutable and content-addressed: a hash never changes meaning,
//! so cached blocks never need invalidation, only population. Normalization
//! turns the upstream wire payload into [`Block`], deriving
//! `transaction_byte_total` from the declared wire size rather than trusting
//! a per-transaction sum (see [`Block::from_raw`]).

use serde::{Deserialize, Serialize};

use crate::client::RawBlock;

mod repository;

pub use repository::BlockRepository;

/// Fixed block header size in bytes.
const BLOCK_HEADER_BYTES: u64 = 80;

/// A transaction inside a normalized block. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction hash
    pub hash: String,
    /// Transaction size in bytes
    pub size_bytes: u64,
}

/// A normalized, immutable block.
///
/// `transaction_byte_total` is derived at normalization time and carried with
/// the block; downstream aggregation and consumption reporting use it instead
/// of re-summing transaction sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block hash (unique content address)
    pub hash: String,
    /// Hash of the preceding block
    pub previous_hash: String,
    /// Block timestamp in unix seconds
    pub timestamp_sec: i64,
    /// Declared on-wire block size in bytes
    pub size_bytes: u64,
    /// Transactions in block order
    pub transactions: Vec<Transaction>,
    /// Bytes occupied by transaction data (wire size minus header overhead)
    pub transaction_byte_total: u64,
}

/// Width in bytes of the variable-length transaction-count field.
///
/// The wire encoding widens with the transaction count `n`:
///
/// | count                | width |
/// |----------------------|-------|
/// | n ≤ 252              | 1     |
/// | n ≤ 65 535           | 3     |
/// | n ≤ 4 294 967 295    | 5     |
/// | otherwise            | 9     |
fn tx_count_field_width(tx_count: u64) -> u64 {
    if tx_count <= 252 {
        1
    } else if tx_count <= 65_535 {
        3
    } else if tx_count <= 4_294_967_295 {
        5
    } else {
        9
    }
}

impl Block {
    /// Normalizes an upstream payload into a [`Block`].
    ///
    /// The sum of individual transaction sizes is not the on-wire block size:
    /// the wire size also carries an 80-byte fixed header and the
    /// variable-width transaction-count field. The transaction byte total is
    /// therefore the declared size minus that overhead, saturating at zero.
    pub fn from_raw(raw: RawBlock) -> Self {
        let overhead = BLOCK_HEADER_BYTES + tx_count_field_width(raw.tx.len() as u64);
        let transaction_byte_total = raw.size.saturating_sub(overhead);

        let transactions = raw
            .tx
            .into_iter()
            .map(|tx| Transaction {
                hash: tx.hash,
                size_bytes: tx.size,
            })
            .collect();

        Self {
            hash: raw.hash,
            previous_hash: raw.prev_block,
            timestamp_sec: raw.time,
            size_bytes: raw.size,
            transactions,
            transaction_byte_total,
        }
    }
}
