// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Upstream ledger API client.
//!
//! The [`LedgerApi`] trait is the seam the core consumes: one logical
//! "fetch resource by path" capability, owning retry-with-backoff and a
//! process-wide ceiling on in-flight requests. [`HttpLedgerClient`] is the
//! reqwest-backed reference implementation against a blockchain.info-style
//! HTTP API.
//!
//! # Example
//!
//! ```rust,ignore
//! use chainbytes::{ClientConfig, HttpLedgerClient, LedgerApi};
//!
//! let client = HttpLedgerClient::new(ClientConfig::default());
//! let raw = client.fetch_block("0000000000000000000050af…").await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::{debug, warn};
use url::Url;

use crate::days::DayKey;
use crate::errors::LedgerApiError;

mod retry;
mod types;

pub use retry::RetryConfig;
pub use types::{DayBlockSummary, RawBlock, RawTransaction};

/// Default upstream endpoint.
const DEFAULT_BASE_URL: &str = "https://blockchain.info";
/// Default ceiling on simultaneous in-flight requests across the process.
const DEFAULT_MAX_IN_FLIGHT: usize = 100;
/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Read operations the core consumes from the upstream ledger service.
///
/// Implementations own retry and concurrency policy; callers fan out freely
/// and rely on the implementation's ceiling to bound upstream load.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Fetches the raw payload of a single block by hash.
    async fn fetch_block(&self, hash: &str) -> Result<RawBlock, LedgerApiError>;

    /// Fetches the hash/timestamp listing of every block on a calendar day.
    async fn fetch_blocks_for_day(
        &self,
        day: DayKey,
    ) -> Result<Vec<DayBlockSummary>, LedgerApiError>;
}

#[async_trait]
impl<T: LedgerApi + ?Sized> LedgerApi for Arc<T> {
    async fn fetch_block(&self, hash: &str) -> Result<RawBlock, LedgerApiError> {
        (**self).fetch_block(hash).await
    }

    async fn fetch_blocks_for_day(
        &self,
        day: DayKey,
    ) -> Result<Vec<DayBlockSummary>, LedgerApiError> {
        (**self).fetch_blocks_for_day(day).await
    }
}

/// Configuration for [`HttpLedgerClient`].
///
/// Retry count, backoff curve, and the in-flight ceiling live here rather
/// than in module state, so tests can substitute deterministic policies.
///
/// # Example
///
/// ```rust
/// use chainbytes::{ClientConfig, RetryConfig};
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_retry(RetryConfig::zero_delay(1))
///     .with_max_in_flight(8)
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the upstream service
    pub base_url: Url,
    /// Retry policy applied to every request
    pub retry: RetryConfig,
    /// Maximum simultaneous in-flight requests across all callers
    pub max_in_flight: usize,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration for the given upstream base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            retry: RetryConfig::default(),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Set the ceiling on simultaneous in-flight requests.
    #[must_use]
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        // The literal is a compile-time constant; parsing cannot fail.
        Self::new(Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"))
    }
}

/// Reqwest-backed [`LedgerApi`] implementation.
///
/// One client holds one connection pool: keep-alive connections are reused
/// across every fetch issued through it, so a high fan-out aggregation does
/// not open a socket per block. A [`Semaphore`] enforces the configured
/// in-flight ceiling; permits are held for the full duration of a logical
/// fetch, including its retries.
///
/// Cloning is cheap and shares the pool, ceiling, and policy.
#[derive(Clone)]
pub struct HttpLedgerClient {
    http: reqwest::Client,
    base_url: Url,
    retry: RetryConfig,
    in_flight: Arc<Semaphore>,
}

impl HttpLedgerClient {
    /// Create a client from the given configuration.
    pub fn new(config: ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: config.base_url,
            retry: config.retry,
            in_flight: Arc::new(Semaphore::new(config.max_in_flight)),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path
        )
    }

    /// Issues one GET and classifies the outcome; no retries at this level.
    async fn get_once(&self, url: &str) -> Result<Vec<u8>, LedgerApiError> {
        let response =
            self.http
                .get(url)
                .send()
                .await
                .map_err(|source| LedgerApiError::Transport {
                    url: url.to_string(),
                    source,
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LedgerApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| LedgerApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        Ok(body.to_vec())
    }

    /// GET with retry-with-backoff, bounded by the in-flight ceiling.
    ///
    /// Payload validation runs once, after a successful response; validation
    /// failures are never retried.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, LedgerApiError> {
        let url = self.endpoint(path);

        // The semaphore is owned by this client and never closed.
        let _permit = self
            .in_flight
            .acquire()
            .await
            .expect("in-flight semaphore closed");

        let mut attempt = 0u32;
        let body = loop {
            match self.get_once(&url).await {
                Ok(body) => {
                    if attempt > 0 {
                        debug!(url = %url, attempt, "Request succeeded after retry");
                    }
                    break body;
                }
                Err(error) => {
                    if !retry::is_retryable_error(&error) {
                        debug!(url = %url, error = %error, "Non-retryable error, not retrying");
                        return Err(error);
                    }

                    if attempt >= self.retry.max_retries {
                        warn!(
                            url = %url,
                            error = %error,
                            attempts = attempt + 1,
                            "Max retries exceeded"
                        );
                        return Err(error);
                    }

                    let delay = retry::calculate_backoff(attempt, &self.retry);
                    warn!(
                        url = %url,
                        error = %error,
                        attempt = attempt + 1,
                        max_retries = self.retry.max_retries,
                        delay_ms = delay.as_millis(),
                        "Retryable error, backing off"
                    );

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        };

        serde_json::from_slice(&body).map_err(|source| LedgerApiError::Validation {
            url: url.clone(),
            source,
        })
    }
}

#[async_trait]
impl LedgerApi for HttpLedgerClient {
    async fn fetch_block(&self, hash: &str) -> Result<RawBlock, LedgerApiError> {
        self.get_json(&format!("rawblock/{hash}")).await
    }

    async fn fetch_blocks_for_day(
        &self,
        day: DayKey,
    ) -> Result<Vec<DayBlockSummary>, LedgerApiError> {
        self.get_json(&format!("blocks/{}?format=json", day.as_millis()))
            .await
    }
}
