//! Error types for web search
//!
//! A [`StrategyFailure`] describes one backend attempt that did not produce
//! results. Those stay inside the searcher and drive fallback; callers only
//! ever see a [`SearchError`].

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Why a single strategy attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "status")]
pub enum FailureKind {
    /// Connection refused, DNS failure, TLS error, broken body
    Network,
    /// The attempt exceeded the configured timeout
    Timeout,
    /// The backend answered with a non-success status
    HttpStatus(u16),
    /// Rate limiting, CAPTCHA or other bot blocking
    Blocked,
    /// The page had no recognizable result structure
    Parse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Blocked => write!(f, "blocked"),
            FailureKind::Parse => write!(f, "parse"),
        }
    }
}

/// One failed strategy attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{strategy} failed ({kind}): {message}")]
pub struct StrategyFailure {
    /// Name of the backend that was attempted
    pub strategy: String,
    pub kind: FailureKind,
    pub message: String,
}

impl StrategyFailure {
    pub fn new(strategy: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Errors surfaced to callers of the searcher
#[derive(Debug, Error)]
pub enum SearchError {
    /// The topic was empty or whitespace only
    #[error("invalid query: topic must not be empty")]
    InvalidQuery,

    /// Every configured strategy failed
    #[error("search unavailable: {}", summarize(.attempts))]
    SearchUnavailable {
        /// Each attempt in the order it was made
        attempts: Vec<StrategyFailure>,
    },
}

fn summarize(attempts: &[StrategyFailure]) -> String {
    if attempts.is_empty() {
        return "no search strategies configured".to_string();
    }
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Invalid configuration detected at startup
#[derive(Debug, Error)]
#[error("config error: {0}")]
pub struct ConfigError(pub String);
