//! Tool handlers
//!
//! Each handler takes the searcher, config and params and produces the
//! tool result. Error mapping lives here: a blank topic is a protocol-level
//! `invalid_params`, an unreachable search is a tool result with `is_error`
//! set so clients can tell it apart from an empty result set.

use mcp_common::{invalid_params, json_error, json_success, CallToolResult, McpError};
use std::time::Instant;

use crate::config::Config;
use crate::error::SearchError;
use crate::params::SearchWebParams;
use crate::searcher::Searcher;
use crate::types::{SearchFailure, SearchInfo, SearchResponse};

pub async fn search_web(
    searcher: &Searcher,
    config: &Config,
    params: SearchWebParams,
) -> Result<CallToolResult, McpError> {
    if params.num_results == Some(0) {
        return Err(invalid_params("num_results must be at least 1"));
    }
    let limit = config.search.effective_limit(params.num_results);

    tracing::info!("Searching for topic: {} (limit: {})", params.topic, limit);
    let started = Instant::now();

    match searcher.search_outcome(&params.topic, limit).await {
        Ok(outcome) => {
            let response =
                SearchResponse::new(params.topic, outcome.results, outcome.backend, started.elapsed());
            tracing::info!(
                count = response.count,
                backend = %response.backend,
                seconds = response.search_time_seconds,
                "Search completed"
            );
            json_success(&response)
        }
        Err(err) => {
            let error = err.to_string();
            match err {
                SearchError::InvalidQuery => Err(invalid_params(error)),
                SearchError::SearchUnavailable { attempts } => {
                    tracing::error!("Search failed for '{}': {}", params.topic, error);
                    json_error(&SearchFailure {
                        topic: params.topic,
                        error,
                        attempts,
                    })
                }
            }
        }
    }
}

pub fn get_search_info(searcher: &Searcher, config: &Config) -> Result<CallToolResult, McpError> {
    let info = SearchInfo {
        name: "Web Search Service".to_string(),
        description: "Searches the web for a topic and returns titles, URLs and snippets"
            .to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        strategies: searcher.strategy_names(),
        default_max_results: config.search.max_results,
        max_results_limit: config.search.max_results_limit,
        timeout_seconds: config.search.timeout_seconds,
        features: vec![
            "Real-time web search".to_string(),
            "Ordered fallback between search engines".to_string(),
            "De-duplicated, normalized results".to_string(),
            "Search time tracking".to_string(),
        ],
    };

    json_success(&info)
}
