use crate::error::FeedError;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use reqwest::header::{
    ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderValue,
    UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Rotated one per attempt.
pub const USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
];

/// Fetches a page body. Split out so scraping can be exercised against
/// fixed HTML.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get_page(&self, url: &str) -> Result<String, FeedError>;

    /// Longest a failing `get_page` can take, pauses included. `None` when
    /// the fetcher has no bound of its own.
    fn worst_case(&self) -> Option<Duration> {
        None
    }
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn get_page(&self, url: &str) -> Result<String, FeedError> {
        (**self).get_page(url).await
    }

    fn worst_case(&self) -> Option<Duration> {
        (**self).worst_case()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: usize,
    pub base_delay: Duration,
    pub step_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: USER_AGENTS.len(),
            base_delay: Duration::from_secs(2),
            step_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Pause before attempt `attempt` (zero-based). The first attempt goes
    /// out immediately; later ones wait `base + attempt * step`.
    #[must_use]
    pub fn delay_before(&self, attempt: usize) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let attempt = u32::try_from(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .saturating_add(self.step_delay.saturating_mul(attempt))
    }

    /// Sum of every pause across all attempts.
    #[must_use]
    pub fn total_delay(&self) -> Duration {
        (0..self.attempts.max(1))
            .map(|a| self.delay_before(a))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

fn browser_headers(user_agent: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(user_agent));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    // Only what the client can decode.
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

/// Plain GET with browser headers, retried in line with a rotating user
/// agent and a growing pause between attempts.
pub struct RetryingPageFetcher {
    client: Client,
    request_timeout: Duration,
    policy: RetryPolicy,
}

impl RetryingPageFetcher {
    /// `timeout` bounds each request on its own.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the HTTP client cannot be built.
    pub fn new(timeout: Duration, policy: RetryPolicy) -> Result<Self, FeedError> {
        Self::with_builder(Client::builder(), timeout, policy)
    }

    /// Like [`RetryingPageFetcher::new`], starting from a caller's builder
    /// (proxy or TLS settings). Timeout and gzip are set on top of it.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the HTTP client cannot be built.
    pub fn with_builder(
        builder: ClientBuilder,
        timeout: Duration,
        policy: RetryPolicy,
    ) -> Result<Self, FeedError> {
        let client = builder
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| FeedError::Config(format!("http client: {e}")))?;
        Ok(Self {
            client,
            request_timeout: timeout,
            policy,
        })
    }

    async fn attempt(&self, url: &str, user_agent: &'static str) -> Result<String, FeedError> {
        let resp = self
            .client
            .get(url)
            .headers(browser_headers(user_agent))
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.text().await?)
    }
}

#[async_trait]
impl PageFetcher for RetryingPageFetcher {
    async fn get_page(&self, url: &str) -> Result<String, FeedError> {
        let attempts = self.policy.attempts.max(1);
        let mut last_err = FeedError::SourceUnavailable(format!("{url}: no attempt made"));

        for attempt in 0..attempts {
            let delay = self.policy.delay_before(attempt);
            if !delay.is_zero() {
                debug!(%url, attempt = attempt + 1, ?delay, "waiting before retry");
                tokio::time::sleep(delay).await;
            }

            let user_agent = USER_AGENTS[attempt % USER_AGENTS.len()];
            match self.attempt(url, user_agent).await {
                Ok(body) => {
                    info!(%url, attempt = attempt + 1, bytes = body.len(), "fetched page");
                    return Ok(body);
                }
                Err(err) => {
                    warn!(%url, attempt = attempt + 1, "page fetch failed: {err}");
                    last_err = err;
                }
            }
        }

        warn!(%url, attempts, "all page fetch attempts failed");
        Err(last_err)
    }

    fn worst_case(&self) -> Option<Duration> {
        let attempts = u32::try_from(self.policy.attempts.max(1)).unwrap_or(u32::MAX);
        Some(
            self.policy
                .total_delay()
                .saturating_add(self.request_timeout.saturating_mul(attempts)),
        )
    }
}
