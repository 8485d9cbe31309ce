// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-day aggregation: canonical day keys, the transaction-byte aggregator,
//! the next-block-time predictor, and the adaptive TTL policy.
//!
//! A closed calendar day is immutable: its aggregate is permanently correct
//! and cached without expiry. The current day is provisional: more blocks may
//! still appear, so its cached aggregate carries a TTL predicted from the
//! day's observed inter-block intervals.

use std::time::{SystemTime, UNIX_EPOCH};

mod aggregator;
mod key;
mod predictor;
mod ttl;

pub use aggregator::{DayAggregate, DayAggregator};
pub use key::DayKey;
pub use predictor::predicted_ms_until_next_block;
pub use ttl::{clamp_ttl, DEFAULT_MIN_TTL, MAX_DAY_TTL};

/// Current wall-clock time as epoch-milliseconds.
pub(crate) fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
