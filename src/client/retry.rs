// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Retry policy with exponential backoff for upstream ledger requests.
//!
//! The backoff formula is:
//!
//! ```text
//! delay = min(base_delay * 2^attempt, max_delay)
//! ```
//!
//! Retry eligibility is decided per error: transport failures and HTTP 429/5xx
//! responses are transient and retried; any other status and all payload
//! validation failures are surfaced immediately.

use std::time::Duration;

use crate::errors::LedgerApiError;

/// Default maximum number of retry attempts.
const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default base delay for exponential backoff (100ms).
const DEFAULT_BASE_DELAY_MS: u64 = 100;
/// Default maximum delay between retries (30 seconds).
const DEFAULT_MAX_DELAY_MS: u64 = 30_000;

/// Configuration for retry behavior.
///
/// Fields are public so tests can substitute deterministic policies (for
/// example `max_retries: 0`, or a zero base delay).
///
/// # Example
///
/// ```rust
/// use chainbytes::RetryConfig;
/// use std::time::Duration;
///
/// let policy = RetryConfig {
///     max_retries: 5,
///     base_delay: Duration::from_millis(200),
///     max_delay: Duration::from_secs(60),
/// };
/// ```
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not including the initial request).
    pub max_retries: u32,
    /// Base delay for exponential backoff.
    pub base_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        }
    }
}

impl RetryConfig {
    /// A policy that never retries. Failures surface on the first attempt.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// A policy that retries without sleeping between attempts.
    ///
    /// Intended for tests that exercise retry counting deterministically.
    pub fn zero_delay(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }
}

/// Calculates the backoff duration for a given attempt.
///
/// Uses exponential backoff: `min(base_delay * 2^attempt, max_delay)`
pub(crate) fn calculate_backoff(attempt: u32, config: &RetryConfig) -> Duration {
    let multiplier = 2u64.saturating_pow(attempt);
    let delay_ms = config
        .base_delay
        .as_millis()
        .saturating_mul(multiplier as u128);
    let capped_delay_ms = delay_ms.min(config.max_delay.as_millis()) as u64;
    Duration::from_millis(capped_delay_ms)
}

/// Determines if an error is retryable.
///
/// Returns `true` for transient errors that may succeed on retry:
/// - Transport failures (connection issues, timeouts)
/// - HTTP 429 (rate limited), retried under the same budget as other faults
/// - HTTP 5xx (upstream fault)
///
/// Returns `false` for errors that will not benefit from retry:
/// - Any other HTTP status (4xx means the request itself is wrong)
/// - Payload validation failures (a well-formed response won't appear on retry)
pub(crate) fn is_retryable_error(error: &LedgerApiError) -> bool {
    match error {
        LedgerApiError::Transport { .. } => true,
        LedgerApiError::Status { status, .. } => is_retryable_status(*status),
        LedgerApiError::Validation { .. } => false,
    }
}

/// Determines if an HTTP status code is worth retrying.
pub(crate) fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..=599).contains(&status)
}
