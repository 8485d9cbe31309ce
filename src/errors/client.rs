// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the upstream ledger API client.
//!
//! These errors surface only after the client's retry policy has been
//! exhausted; transient failures (connection resets, HTTP 429, HTTP 5xx) are
//! retried transparently inside the client first.

/// Errors that can occur when fetching a resource from the upstream ledger API.
///
/// The triggering HTTP status code is preserved where one exists, so callers
/// can distinguish rate limiting (429) from other upstream faults after the
/// retry budget has been spent.
///
/// # Examples
///
/// ```rust
/// use chainbytes::LedgerApiError;
///
/// let error = LedgerApiError::Status {
///     status: 429,
///     url: "https://blockchain.info/rawblock/abc".to_string(),
/// };
/// assert_eq!(error.status_code(), Some(429));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum LedgerApiError {
    /// The upstream service answered with a non-success HTTP status.
    ///
    /// For retryable statuses (429, 5xx) this is the status of the *last*
    /// attempt after the retry budget was exhausted.
    #[error("Upstream returned HTTP {status} for {url}")]
    Status {
        /// HTTP status code of the failing response
        status: u16,
        /// The request URL that failed
        url: String,
    },

    /// The request never produced an HTTP response.
    ///
    /// Connection failures, timeouts, and protocol errors end up here. Like
    /// [`LedgerApiError::Status`], this is surfaced only after retries.
    #[error("Transport failure for {url}")]
    Transport {
        /// The request URL that failed
        url: String,
        /// The underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The response body did not match the expected payload schema.
    ///
    /// Validation failures are not retried: a malformed payload from a
    /// successful response will not improve on a second attempt.
    #[error("Invalid payload from {url}")]
    Validation {
        /// The request URL whose payload failed validation
        url: String,
        /// The underlying decode error
        #[source]
        source: serde_json::Error,
    },
}

impl LedgerApiError {
    /// Returns the HTTP status code associated with this error, if any.
    ///
    /// `Transport` and `Validation` errors carry no status code.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LedgerApiError::Status { status, .. } => Some(*status),
            LedgerApiError::Transport { .. } | LedgerApiError::Validation { .. } => None,
        }
    }
}
