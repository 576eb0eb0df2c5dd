//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client shared by one crawl
//! - Picking a random user agent for every attempt
//! - Per-attempt timeouts
//! - Retry with exponential backoff
//! - Error classification

use crate::config::Config;
use rand::seq::SliceRandom;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// User agent sent if the configured pool is somehow empty
const FALLBACK_USER_AGENT: &str = concat!("webdiver/", env!("CARGO_PKG_VERSION"));

/// Reasons a fetch can fail
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request did not complete within the per-attempt timeout
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-2xx status
    #[error("HTTP status {0}")]
    Status(u16),

    /// Connection, TLS, body decoding or other transport failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Every attempt failed; `last` is the final attempt's error
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: Box<FetchError> },
}

impl FetchError {
    fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if let Some(status) = error.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

/// Retry budget and backoff schedule
///
/// # Retry Logic
///
/// | Attempt | Wait before it |
/// |---------|----------------|
/// | 1 | none |
/// | 2 | 1 unit |
/// | 3 | 2 units |
/// | 4 | 4 units |
///
/// With `max_retries = 3` a URL is tried at most four times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt
    pub max_retries: u32,

    /// Length of one backoff unit
    pub backoff_unit: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff_unit: Duration) -> Self {
        Self {
            max_retries,
            backoff_unit,
        }
    }

    /// Builds the policy from the crawler section of the configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.crawler.max_retries,
            Duration::from_millis(config.crawler.backoff_unit_ms),
        )
    }

    /// Total attempts including the first one
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Wait before retry number `retry` (1-based): `2^(retry - 1)` units
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.backoff_unit.saturating_mul(factor)
    }

    /// All waits in the order they are applied
    pub fn schedule(&self) -> Vec<Duration> {
        (1..=self.max_retries).map(|retry| self.delay_for(retry)).collect()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Builds the HTTP client used for one crawl
///
/// The client owns the connection pool; it is dropped together with the
/// coordinator that created it. User agents are set per request.
///
/// # Example
///
/// ```no_run
/// use webdiver::config::Config;
/// use webdiver::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.crawler.request_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages with a random user agent and bounded retries
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    user_agents: Vec<String>,
    timeout: Duration,
    policy: RetryPolicy,
}

impl Fetcher {
    /// Creates a fetcher over an existing client
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            user_agents: config.user_agent.pool.clone(),
            timeout: Duration::from_secs(config.crawler.request_timeout_secs),
            policy: RetryPolicy::from_config(config),
        }
    }

    /// Replaces the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The retry policy in effect
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetches a URL, retrying transient failures
    ///
    /// Every failed attempt is logged with the URL and reason. Once the retry
    /// budget is spent the last error is returned wrapped in
    /// [`FetchError::Exhausted`]; callers decide whether that is fatal.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut delays = self.policy.schedule().into_iter();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let error = match self.fetch_once(url).await {
                Ok(body) => {
                    tracing::debug!("Fetched {} on attempt {}", url, attempt);
                    return Ok(body);
                }
                Err(e) => e,
            };

            match delays.next() {
                Some(delay) => {
                    tracing::error!(
                        "Error fetching {} (attempt {}): {}, retrying in {:?}",
                        url,
                        attempt,
                        error,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    tracing::error!(
                        "Giving up on {} after {} attempts: {}",
                        url,
                        attempt,
                        error
                    );
                    return Err(FetchError::Exhausted {
                        attempts: attempt,
                        last: Box::new(error),
                    });
                }
            }
        }
    }

    /// Performs a single GET with a fresh user agent
    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let user_agent = self.random_user_agent().to_string();

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(&e))
    }

    /// Picks a user agent from the configured pool
    pub fn random_user_agent(&self) -> &str {
        self.user_agents
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or(FALLBACK_USER_AGENT)
    }
}
