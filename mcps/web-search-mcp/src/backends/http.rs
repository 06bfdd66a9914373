//! Shared HTTP plumbing for HTML search backends
//!
//! One [`HttpFetcher`] is built per server and shared by every backend.
//! It applies browser-like headers, the per-attempt timeout, and turns
//! transport errors and bad statuses into [`StrategyFailure`]s.

use rand::seq::SliceRandom;
use reqwest::{header, Client, RequestBuilder};
use url::Url;

use crate::config::SearchConfig;
use crate::error::{ConfigError, FailureKind, StrategyFailure};

/// Browser User-Agent strings rotated per request
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// A fetched page that passed status checks
#[derive(Debug)]
pub struct Page {
    /// URL after redirects
    pub final_url: Url,
    pub body: String,
}

/// HTTP client wrapper shared by the search backends
pub struct HttpFetcher {
    client: Client,
    user_agent: Option<String>,
    blocked_status_codes: Vec<u16>,
}

impl HttpFetcher {
    pub fn new(config: &SearchConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| ConfigError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            blocked_status_codes: config.blocked_status_codes.clone(),
        })
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.with_headers(self.client.get(url))
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.with_headers(self.client.post(url))
    }

    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let ua = match self.user_agent {
            Some(ref custom) => custom.as_str(),
            None => random_user_agent(),
        };
        request
            .header(header::USER_AGENT, ua)
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
    }

    /// Send a request and read the body, classifying any failure
    pub async fn fetch_page(
        &self,
        strategy: &str,
        request: RequestBuilder,
    ) -> Result<Page, StrategyFailure> {
        let response = request.send().await.map_err(|e| {
            let kind = if e.is_timeout() {
                FailureKind::Timeout
            } else {
                FailureKind::Network
            };
            StrategyFailure::new(strategy, kind, format!("request failed: {e}"))
        })?;

        let status = response.status();
        if self.blocked_status_codes.contains(&status.as_u16()) {
            return Err(StrategyFailure::new(
                strategy,
                FailureKind::Blocked,
                format!("backend refused the request with {status}"),
            ));
        }
        if !status.is_success() {
            return Err(StrategyFailure::new(
                strategy,
                FailureKind::HttpStatus(status.as_u16()),
                format!("unexpected status {status}"),
            ));
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|e| {
            let kind = if e.is_timeout() {
                FailureKind::Timeout
            } else {
                FailureKind::Network
            };
            StrategyFailure::new(strategy, kind, format!("failed to read body: {e}"))
        })?;

        tracing::trace!(strategy, bytes = body.len(), "page received");
        Ok(Page { final_url, body })
    }
}

/// Select a random User-Agent string from the rotation list
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        .unwrap_or(USER_AGENTS[0])
}
