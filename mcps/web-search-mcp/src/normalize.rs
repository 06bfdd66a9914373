//! Candidate normalization
//!
//! Turns raw strategy output into the results callers see: text is trimmed
//! with inner whitespace collapsed, entries without an absolute http(s) URL
//! are dropped, duplicate URLs keep their first (best ranked) occurrence,
//! and the list is cut to the requested length.

use std::collections::HashSet;
use url::Url;

use crate::types::{Candidate, SearchResult};

/// Title used when a source gives a result without one
pub const UNTITLED: &str = "Untitled";

/// Normalize candidates in rank order, keeping at most `max_results`
pub fn normalize(candidates: Vec<Candidate>, max_results: usize) -> Vec<SearchResult> {
    let total = candidates.len();
    let mut seen = HashSet::new();
    let mut results = Vec::with_capacity(total.min(max_results));
    let mut dropped = 0usize;

    for candidate in candidates {
        if results.len() >= max_results {
            break;
        }

        let Some(url) = candidate.url.as_deref().and_then(usable_url) else {
            dropped += 1;
            continue;
        };
        if !seen.insert(url.clone()) {
            continue;
        }

        let title = candidate
            .title
            .as_deref()
            .map(clean_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());
        let snippet = candidate
            .snippet
            .as_deref()
            .map(clean_text)
            .unwrap_or_default();

        results.push(SearchResult {
            title,
            url,
            snippet,
        });
    }

    if dropped > 0 {
        tracing::debug!(total, dropped, "dropped candidates without a usable url");
    }

    results
}

/// Collapse runs of whitespace and trim both ends
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Accept only absolute http(s) URLs with a host
fn usable_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = Url::parse(trimmed).ok()?;
    let web_scheme = matches!(parsed.scheme(), "http" | "https");
    if !web_scheme || parsed.host_str().map_or(true, str::is_empty) {
        return None;
    }

    Some(trimmed.to_string())
}
