// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Next-block-time prediction from observed inter-block intervals.

/// Estimates how many milliseconds until the next block arrives.
///
/// Block arrival is a noisy point process; the mean inter-arrival time of the
/// day's observed sample is a cheap, defensible forecast of how long the
/// current cached total stays representative, without modeling the full
/// stochastic arrival process.
///
/// Given the timestamps (unix seconds) of the blocks already seen today:
///
/// 1. Fewer than 2 samples → 0 (insufficient data to extrapolate).
/// 2. The mean of consecutive gaps over the sorted sample collapses to
///    `(last − first) / (count − 1)`.
/// 3. The next block is predicted at `last + mean`, and the result is that
///    instant in milliseconds minus `now_ms`, negative when the predicted
///    arrival has already passed.
///
/// # Examples
///
/// ```rust
/// use chainbytes::predicted_ms_until_next_block;
///
/// // Blocks 60s apart; the next one is predicted 60s after the last
/// assert_eq!(predicted_ms_until_next_block(220_000, &[100, 160, 220]), 60_000);
/// ```
pub fn predicted_ms_until_next_block(now_ms: i64, block_timestamps_sec: &[i64]) -> i64 {
    if block_timestamps_sec.len() < 2 {
        return 0;
    }

    let mut sorted = block_timestamps_sec.to_vec();
    sorted.sort_unstable();

    let first = sorted[0];
    let last = sorted[sorted.len() - 1];
    let avg_interval_sec = (last - first) as f64 / (sorted.len() - 1) as f64;

    let predicted_next_ms = (last as f64 + avg_interval_sec) * 1000.0;
    predicted_next_ms.round() as i64 - now_ms
}
