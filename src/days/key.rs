// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Canonical day keys.

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds in one UTC calendar day.
const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// The canonical key of a UTC calendar day: its midnight as epoch-milliseconds.
///
/// Two instants map to the same key iff they fall on the same UTC calendar
/// date. The mapping never consults the process locale; a prior revision in
/// this lineage leaked the local-timezone offset into the key, which made the
/// same instant resolve to different keys on differently-configured hosts.
///
/// The `Display` form (the decimal millisecond value) is the cache key for
/// the day's aggregate and must stay stable across deployments.
///
/// # Examples
///
/// ```rust
/// use chainbytes::DayKey;
///
/// // 2018-04-01T17:44:32Z is on the UTC day starting 2018-04-01T00:00:00Z
/// let key = DayKey::from_timestamp_ms(1_522_604_672_000);
/// assert_eq!(key.as_millis(), 1_522_540_800_000);
/// assert_eq!(key.to_string(), "1522540800000");
///
/// // Idempotent: a key maps to itself
/// assert_eq!(DayKey::from_timestamp_ms(key.as_millis()), key);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DayKey(i64);

impl DayKey {
    /// Canonical key of the UTC calendar day containing `timestamp_ms`.
    ///
    /// Pure and total: Euclidean flooring keeps pre-epoch instants on their
    /// own calendar day rather than rounding toward zero.
    pub fn from_timestamp_ms(timestamp_ms: i64) -> Self {
        Self(timestamp_ms.div_euclid(MS_PER_DAY) * MS_PER_DAY)
    }

    /// Canonical key of the given calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
    }

    /// The key as epoch-milliseconds (always a UTC midnight).
    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// The calendar date this key identifies.
    ///
    /// `None` only for keys outside chrono's representable date range.
    pub fn date(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp_millis(self.0).map(|dt| dt.date_naive())
    }

    /// The key `n` whole days earlier.
    pub fn days_ago(&self, n: u32) -> Self {
        Self(self.0 - i64::from(n) * MS_PER_DAY)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
