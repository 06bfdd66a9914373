//! Common types for web search results
//!
//! Strategies produce [`Candidate`]s; the searcher normalizes them into
//! [`SearchResult`]s and the tool layer wraps those in a [`SearchResponse`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::StrategyFailure;

/// A raw entry extracted by a search strategy, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub title: Option<String>,
    pub url: Option<String>,
    pub snippet: Option<String>,
}

impl Candidate {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            url: Some(url.into()),
            snippet: Some(snippet.into()),
        }
    }
}

/// A single web search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the result
    pub title: String,
    /// Absolute URL of the result, never empty
    pub url: String,
    /// A description or snippet of the result, possibly empty
    pub snippet: String,
}

/// The envelope returned by the `search_web` tool
///
/// `count` is derived from `results` at construction and cannot drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The topic exactly as the caller supplied it
    pub topic: String,
    /// Results in the order the serving backend ranked them
    pub results: Vec<SearchResult>,
    /// Number of entries in `results`
    pub count: usize,
    /// The backend that served the results
    pub backend: String,
    /// Wall-clock search duration, rounded to hundredths
    pub search_time_seconds: f64,
}

impl SearchResponse {
    pub fn new(
        topic: impl Into<String>,
        results: Vec<SearchResult>,
        backend: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            topic: topic.into(),
            count: results.len(),
            results,
            backend: backend.into(),
            search_time_seconds: round_hundredths(elapsed.as_secs_f64()),
        }
    }
}

/// Results of one successful search, tagged with the backend that served them
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub results: Vec<SearchResult>,
    pub backend: String,
}

/// Body of the tool error returned when every strategy failed
#[derive(Debug, Clone, Serialize)]
pub struct SearchFailure {
    pub topic: String,
    pub error: String,
    /// Each strategy attempt in order, with its failure class
    pub attempts: Vec<StrategyFailure>,
}

/// Static description of the service, returned by `get_search_info`
#[derive(Debug, Clone, Serialize)]
pub struct SearchInfo {
    pub name: String,
    pub description: String,
    pub version: String,
    /// Strategy names in attempt order
    pub strategies: Vec<String>,
    pub default_max_results: usize,
    pub max_results_limit: usize,
    pub timeout_seconds: u64,
    pub features: Vec<String>,
}

fn round_hundredths(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(n: usize) -> SearchResult {
        SearchResult {
            title: format!("Result {n}"),
            url: format!("https://example.com/{n}"),
            snippet: String::new(),
        }
    }

    #[test]
    fn test_count_matches_results() {
        let response = SearchResponse::new(
            "rust",
            (0..7).map(result).collect(),
            "duckduckgo",
            Duration::from_millis(1234),
        );
        assert_eq!(response.count, response.results.len());
        assert_eq!(response.count, 7);
        assert!((response.search_time_seconds - 1.23).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_response() {
        let response = SearchResponse::new("obscure", vec![], "google", Duration::ZERO);
        assert_eq!(response.count, 0);
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let response = SearchResponse::new(
            "open source license comparison",
            vec![result(1)],
            "duckduckgo",
            Duration::from_millis(500),
        );
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["topic"], "open source license comparison");
        assert_eq!(value["count"], 1);
        assert_eq!(value["results"][0]["title"], "Result 1");
        assert_eq!(value["results"][0]["url"], "https://example.com/1");
        assert_eq!(value["results"][0]["snippet"], "");
        assert_eq!(value["backend"], "duckduckgo");
    }
}
