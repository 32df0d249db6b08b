//! HTTP client for the `proMatches` feed.

use prostats_types::{DataError, MatchId, MatchRecord, ProstatsError};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::parse::{ParseError, first_order_violation, parse_page};
use crate::url::{CURSOR_PARAM, DEFAULT_BASE_URL, pro_matches_url};

/// Back-off policy for rate-limited (HTTP 429) requests.
///
/// The n-th retry waits `base_delay * 2^(n-1)`, capped at `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 10,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy that always waits the same `delay` between retries.
    #[must_use]
    pub const fn fixed(delay: Duration, max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: delay,
            max_delay: delay,
        }
    }

    /// Returns the delay to wait before retry number `attempt` (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay)
    }
}

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL; `/proMatches` is appended to it.
    pub base_url: String,
    /// Timeout for a single request.
    pub timeout: Duration,
    /// Timeout for establishing a connection.
    pub connect_timeout: Duration,
    /// Rate-limit retry policy.
    pub retry: RetryPolicy,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
            user_agent: format!("prostats/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur while fetching a page.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status other than 429.
    #[error("Server error: {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Server kept answering 429 until the retry policy was exhausted.
    #[error("Rate limited after {attempts} attempts")]
    RateLimited {
        /// Number of requests sent.
        attempts: u32,
    },

    /// The response body could not be decoded.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The cancellation token fired.
    #[error("Request cancelled")]
    Cancelled,
}

impl From<FetchError> for ProstatsError {
    fn from(error: FetchError) -> Self {
        match error {
            FetchError::RateLimited { attempts } => Self::RateLimited { attempts },
            FetchError::Cancelled => Self::Cancelled,
            FetchError::Status { status } => Self::Status { status },
            FetchError::Parse(ParseError::Malformed(e)) => {
                Self::Data(DataError::Malformed(e.to_string()))
            }
            other => Self::Fetch(other.to_string()),
        }
    }
}

/// HTTP client for the paginated match feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    config: ClientConfig,
    pages_url: String,
}

impl FeedClient {
    /// Creates a new feed client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            // Pages are fetched one at a time, a single idle connection is enough
            .pool_max_idle_per_host(1)
            .tcp_nodelay(true)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        let pages_url = pro_matches_url(&config.base_url);
        Ok(Self {
            client,
            config,
            pages_url,
        })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches the page of matches older than `cursor`.
    ///
    /// `None` requests the newest page. An empty result means the feed is
    /// exhausted. Rate-limited requests are retried according to the
    /// configured [`RetryPolicy`]; every other failure is returned at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the retries run out, the body
    /// is malformed, or `cancel` fires.
    pub async fn fetch_page(
        &self,
        cursor: Option<MatchId>,
        cancel: &CancellationToken,
    ) -> Result<Vec<MatchRecord>, FetchError> {
        let retry = self.config.retry;
        let mut attempts = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(FetchError::Cancelled);
            }
            attempts += 1;

            let response = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(FetchError::Cancelled),
                response = self.send(cursor) => response?,
            };

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempts > retry.max_retries {
                    return Err(FetchError::RateLimited { attempts });
                }
                let delay = retry.delay_for(attempts);
                warn!(?cursor, attempt = attempts, ?delay, "rate limited by feed, backing off");
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return Err(FetchError::Cancelled),
                    () = tokio::time::sleep(delay) => {}
                }
                continue;
            }

            if !status.is_success() {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                });
            }

            let body = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(FetchError::Cancelled),
                body = response.bytes() => body?,
            };
            let records = parse_page(&body)?;

            if let Some(index) = first_order_violation(&records) {
                warn!(
                    ?cursor,
                    index,
                    match_id = records[index].match_id,
                    "page is not ordered by descending match id"
                );
            }
            debug!(?cursor, attempts, records = records.len(), "fetched page");
            return Ok(records);
        }
    }

    /// Sends a single request for the page after `cursor`.
    async fn send(&self, cursor: Option<MatchId>) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self.client.get(&self.pages_url);
        if let Some(id) = cursor {
            request = request.query(&[(CURSOR_PARAM, id)]);
        }
        request.send().await
    }
}
