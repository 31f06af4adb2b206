//! HTTP fetcher implementation
//!
//! This module handles every HTTP request the scanner makes, including:
//! - Building the HTTP client with a proper user agent string
//! - Retrying rate-limited (429) and server-error (5xx) responses with
//!   jittered exponential backoff
//! - Retrying transport failures with plain exponential backoff

use crate::config::{ApiConfig, RetryConfig, UserAgentConfig};
use crate::SiftError;
use rand::Rng;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `api` - Endpoint configuration (request timeout)
/// * `user_agent` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use friend_sift::api::build_http_client;
/// use friend_sift::config::{ApiConfig, UserAgentConfig};
///
/// let client = build_http_client(&ApiConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    api: &ApiConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    // Format: ClientName/Version
    let user_agent = format!("{}/{}", user_agent.client_name, user_agent.client_version);

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(api.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true for statuses that are retried: 429 and the whole 5xx range
pub fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Backoff schedule shared by every request chain
///
/// Retry `i` (0-indexed) after a 429/5xx waits `2^i * base + U(0, max_jitter)`;
/// after a transport failure it waits `2^i * base` with no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt
    pub max_retries: u32,
    /// Delay before retry 0
    pub base_delay: Duration,
    /// Exclusive upper bound of the jitter added to status retries
    pub max_jitter: Duration,
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_jitter: Duration::from_millis(config.max_jitter_ms),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl RetryPolicy {
    fn exponential(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Delay before retrying a rate-limited or server-error response
    pub fn status_delay<R: Rng>(&self, attempt: u32, rng: &mut R) -> Duration {
        let jitter = self.max_jitter.mul_f64(rng.gen::<f64>());
        self.exponential(attempt) + jitter
    }

    /// Delay before retrying after a transport failure
    pub fn transport_delay(&self, attempt: u32) -> Duration {
        self.exponential(attempt)
    }
}

/// GET requests with retry and backoff
///
/// Stateless between calls: the attempt counter lives inside one `fetch`.
#[derive(Debug, Clone)]
pub struct ResilientFetcher {
    client: Client,
    policy: RetryPolicy,
}

impl ResilientFetcher {
    pub fn new(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Fetches a URL, retrying transient failures
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | HTTP 429 | Retry, `2^i * base` plus jitter |
    /// | HTTP 5xx | Retry, `2^i * base` plus jitter |
    /// | Transport error | Retry, `2^i * base` |
    /// | Anything else | Return immediately |
    ///
    /// Once retries run out the last 429/5xx response is returned unchanged,
    /// and the last transport error is returned as [`SiftError::Transport`].
    /// Both branches count against the same attempt budget.
    pub async fn fetch(&self, url: &Url) -> Result<Response, SiftError> {
        let mut attempt: u32 = 0;

        loop {
            tracing::debug!(%url, attempt, "GET");

            match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if !is_retryable_status(status) || attempt >= self.policy.max_retries {
                        return Ok(response);
                    }

                    let delay = self.policy.status_delay(attempt, &mut rand::thread_rng());
                    tracing::warn!(
                        %url,
                        status = status.as_u16(),
                        attempt = attempt + 1,
                        max_retries = self.policy.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Retryable status, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    if attempt >= self.policy.max_retries {
                        tracing::error!(%url, error = %e, "Request failed after all retries");
                        return Err(SiftError::Transport {
                            url: url.to_string(),
                            source: e,
                        });
                    }

                    let delay = self.policy.transport_delay(attempt);
                    tracing::warn!(
                        %url,
                        error = %e,
                        attempt = attempt + 1,
                        max_retries = self.policy.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Request failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }

            attempt += 1;
        }
    }
}
