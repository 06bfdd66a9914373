//! Search backend implementations
//!
//! Every backend implements [`SearchBackend`]. The searcher holds an
//! ordered list of them and walks it until one succeeds, so adding a tier
//! is a matter of configuration.

use async_trait::async_trait;
use scraper::Selector;
use std::sync::Arc;

use crate::config::{Config, StrategyKind};
use crate::error::{ConfigError, FailureKind, StrategyFailure};
use crate::types::Candidate;

pub mod duckduckgo;
pub mod google;
pub mod http;

use duckduckgo::DuckDuckGoBackend;
use google::GoogleBackend;
use http::HttpFetcher;

/// Trait for search backends
///
/// A backend performs one request against its provider and extracts
/// unnormalized candidates in rank order. Every failure is reported as a
/// [`StrategyFailure`] so the caller can decide whether to fall back.
/// A well-formed page with no matches is `Ok(vec![])`, not a failure.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Get the name of this backend
    fn name(&self) -> &str;

    /// Run a search; `limit` is a hint for providers that accept a page size
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Candidate>, StrategyFailure>;
}

/// Build the configured strategies in attempt order
pub fn build_backends(config: &Config) -> Result<Vec<Arc<dyn SearchBackend>>, ConfigError> {
    let http = Arc::new(HttpFetcher::new(&config.search)?);

    let backends = config
        .search
        .strategies
        .iter()
        .map(|kind| {
            let base_url = config.backend(*kind).base_url().to_string();
            let backend: Arc<dyn SearchBackend> = match kind {
                StrategyKind::DuckDuckGo => Arc::new(DuckDuckGoBackend::new(http.clone(), base_url)),
                StrategyKind::Google => Arc::new(GoogleBackend::new(http.clone(), base_url)),
            };
            backend
        })
        .collect();

    Ok(backends)
}

/// Compile a CSS selector, reporting a bad one as a parse failure of `strategy`
pub(crate) fn selector(strategy: &str, css: &str) -> Result<Selector, StrategyFailure> {
    Selector::parse(css).map_err(|e| {
        StrategyFailure::new(
            strategy,
            FailureKind::Parse,
            format!("invalid selector '{css}': {e:?}"),
        )
    })
}
