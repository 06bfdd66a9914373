//! Search with ordered fallback
//!
//! [`Searcher`] tries its backends in order, each under its own timeout,
//! and returns the normalized results of the first one that succeeds. A
//! backend whose candidates all lack a usable URL counts as failed. Only
//! when every backend has failed does the caller see an error.
//!
//! Dropping the future returned by [`Searcher::search`] abandons the
//! in-flight request; no further backend is attempted.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::backends::{build_backends, SearchBackend};
use crate::config::Config;
use crate::error::{ConfigError, FailureKind, SearchError, StrategyFailure};
use crate::normalize::normalize;
use crate::types::{SearchOutcome, SearchResult};

/// How a single backend attempt ended
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// The backend answered; `results` is the count after normalization
    Succeeded { results: usize },
    Failed(StrategyFailure),
}

/// Diagnostic record of one backend attempt
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptRecord {
    pub strategy: String,
    pub topic: String,
    pub outcome: AttemptOutcome,
    pub elapsed: Duration,
}

/// Receives a record for every backend attempt
pub trait SearchObserver: Send + Sync {
    fn on_attempt(&self, record: &AttemptRecord);
}

/// Default observer, writes attempts to the tracing subscriber
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_attempt(&self, record: &AttemptRecord) {
        let elapsed_ms = record.elapsed.as_millis() as u64;
        match &record.outcome {
            AttemptOutcome::Succeeded { results } => tracing::info!(
                strategy = %record.strategy,
                topic = %record.topic,
                results,
                elapsed_ms,
                "search strategy succeeded"
            ),
            AttemptOutcome::Failed(failure) => tracing::warn!(
                strategy = %record.strategy,
                topic = %record.topic,
                kind = %failure.kind,
                error = %failure.message,
                elapsed_ms,
                "search strategy failed"
            ),
        }
    }
}

/// Web searcher with an ordered list of fallback strategies
#[derive(Clone)]
pub struct Searcher {
    backends: Vec<Arc<dyn SearchBackend>>,
    timeout: Duration,
    observer: Arc<dyn SearchObserver>,
}

impl Searcher {
    pub fn new(backends: Vec<Arc<dyn SearchBackend>>, timeout: Duration) -> Self {
        Self {
            backends,
            timeout,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Build the configured backends with a shared HTTP client
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(build_backends(config)?, config.search.timeout()))
    }

    /// Replace the observer that receives attempt records
    pub fn with_observer(mut self, observer: Arc<dyn SearchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Names of the backends in attempt order
    pub fn strategy_names(&self) -> Vec<String> {
        self.backends.iter().map(|b| b.name().to_string()).collect()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Search for `topic`, returning at most `max_results` normalized results
    pub async fn search(
        &self,
        topic: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        Ok(self.search_outcome(topic, max_results).await?.results)
    }

    /// Like [`Searcher::search`], also reporting which backend served the results
    pub async fn search_outcome(
        &self,
        topic: &str,
        max_results: usize,
    ) -> Result<SearchOutcome, SearchError> {
        let query = topic.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery);
        }

        let mut attempts = Vec::with_capacity(self.backends.len());

        for backend in &self.backends {
            let started = Instant::now();
            let result = self.attempt(backend.as_ref(), query, max_results).await;

            let outcome = match &result {
                Ok(results) => AttemptOutcome::Succeeded {
                    results: results.len(),
                },
                Err(failure) => AttemptOutcome::Failed(failure.clone()),
            };
            self.observer.on_attempt(&AttemptRecord {
                strategy: backend.name().to_string(),
                topic: query.to_string(),
                outcome,
                elapsed: started.elapsed(),
            });

            match result {
                Ok(results) => {
                    return Ok(SearchOutcome {
                        results,
                        backend: backend.name().to_string(),
                    });
                }
                Err(failure) => attempts.push(failure),
            }
        }

        Err(SearchError::SearchUnavailable { attempts })
    }

    async fn attempt(
        &self,
        backend: &dyn SearchBackend,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, StrategyFailure> {
        let candidates =
            match tokio::time::timeout(self.timeout, backend.search(query, max_results)).await {
                Ok(result) => result?,
                Err(_) => {
                    return Err(StrategyFailure::new(
                        backend.name(),
                        FailureKind::Timeout,
                        format!("no response within {}ms", self.timeout.as_millis()),
                    ))
                }
            };

        let extracted = candidates.len();
        let results = normalize(candidates, max_results);
        if results.is_empty() && extracted > 0 && max_results > 0 {
            return Err(StrategyFailure::new(
                backend.name(),
                FailureKind::Parse,
                format!("no candidate had a usable url ({extracted} extracted)"),
            ));
        }
        Ok(results)
    }
}
