// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Wire types for the upstream ledger API.
//!
//! Field names mirror the upstream JSON exactly; these types never leave the
//! client boundary un-normalized. [`crate::blocks::Block`] is the internal
//! representation derived from [`RawBlock`].

use serde::{Deserialize, Serialize};

/// A transaction as delivered by the `rawblock/{hash}` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Transaction hash
    pub hash: String,
    /// Transaction size in bytes
    pub size: u64,
}

/// A full block payload as delivered by the `rawblock/{hash}` endpoint.
///
/// `next_block` is present on the wire but unused by this crate; it is kept
/// so payload validation matches the upstream schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBlock {
    /// Block hash (content address)
    pub hash: String,
    /// Hash of the preceding block
    pub prev_block: String,
    /// Hashes of known successor blocks
    #[serde(default)]
    pub next_block: Vec<String>,
    /// Declared on-wire block size in bytes
    pub size: u64,
    /// Transactions in block order
    pub tx: Vec<RawTransaction>,
    /// Block timestamp in unix seconds
    pub time: i64,
}

/// One entry of the `blocks/{dayEpochMs}` listing: a block known to have
/// occurred on the requested day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBlockSummary {
    /// Block hash (content address)
    pub hash: String,
    /// Block timestamp in unix seconds
    pub time: i64,
    /// Upstream block index
    pub block_index: u64,
    /// Chain height of the block
    pub height: u64,
}
