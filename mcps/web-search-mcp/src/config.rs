//! Configuration loading for web-search-mcp
//!
//! Configuration is loaded from the first file found of:
//! 1. Environment variable WEB_SEARCH_CONFIG_PATH
//! 2. ./web-search-mcp.toml
//! 3. $XDG_CONFIG_HOME/web-search-mcp/config.toml
//!
//! falling back to defaults. `WEB_SEARCH_DDG_URL`, `WEB_SEARCH_GOOGLE_URL`
//! and `WEB_SEARCH_TIMEOUT_SECS` override the file.

use anyhow::{Context, Result};
use mcp_common::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Search configuration
    #[serde(default)]
    pub search: SearchConfig,
    /// DuckDuckGo specific configuration
    #[serde(default = "BackendConfig::duckduckgo")]
    pub duckduckgo: BackendConfig,
    /// Google specific configuration
    #[serde(default = "BackendConfig::google")]
    pub google: BackendConfig,
    /// Log output configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which backend a strategy tier uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    DuckDuckGo,
    Google,
}

/// General search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of results returned when the caller does not ask for a count
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Upper bound applied to caller-requested counts
    #[serde(default = "default_max_results_limit")]
    pub max_results_limit: usize,
    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Strategies in the order they are attempted
    #[serde(default = "default_strategies")]
    pub strategies: Vec<StrategyKind>,
    /// Fixed User-Agent; a browser UA is rotated per request when unset
    #[serde(default)]
    pub user_agent: Option<String>,
    /// HTTP status codes treated as rate limiting or bot blocking
    #[serde(default = "default_blocked_status_codes")]
    pub blocked_status_codes: Vec<u16>,
}

/// Endpoint configuration for one backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL, without trailing path
    pub url: String,
}

/// Log output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `text` or `json`; `LOG_FORMAT` in the environment wins
    #[serde(default)]
    pub format: LogFormat,
}

// Default value functions
fn default_max_results() -> usize {
    10
}

fn default_max_results_limit() -> usize {
    50
}

fn default_timeout_seconds() -> u64 {
    8
}

fn default_strategies() -> Vec<StrategyKind> {
    vec![StrategyKind::DuckDuckGo, StrategyKind::Google]
}

fn default_blocked_status_codes() -> Vec<u16> {
    vec![403, 429, 503]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            duckduckgo: BackendConfig::duckduckgo(),
            google: BackendConfig::google(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            max_results_limit: default_max_results_limit(),
            timeout_seconds: default_timeout_seconds(),
            strategies: default_strategies(),
            user_agent: None,
            blocked_status_codes: default_blocked_status_codes(),
        }
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Resolve a caller-requested result count against the configured bounds
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.max_results)
            .min(self.max_results_limit)
    }
}

impl BackendConfig {
    pub fn duckduckgo() -> Self {
        Self {
            url: "https://html.duckduckgo.com".to_string(),
        }
    }

    pub fn google() -> Self {
        Self {
            url: "https://www.google.com".to_string(),
        }
    }

    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

impl Config {
    /// Load configuration from file or use defaults, then apply env overrides
    ///
    /// Returns the file the configuration was read from, if any.
    pub fn load() -> Result<(Self, Option<PathBuf>)> {
        let path = Self::find_config_path();
        let mut config = match &path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok((config, path))
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("WEB_SEARCH_DDG_URL") {
            self.duckduckgo.url = url;
        }
        if let Ok(url) = std::env::var("WEB_SEARCH_GOOGLE_URL") {
            self.google.url = url;
        }
        if let Ok(secs) = std::env::var("WEB_SEARCH_TIMEOUT_SECS") {
            self.search.timeout_seconds = secs
                .trim()
                .parse()
                .with_context(|| format!("WEB_SEARCH_TIMEOUT_SECS is not a number: {secs}"))?;
        }
        Ok(())
    }

    /// Find the first existing configuration file
    fn find_config_path() -> Option<PathBuf> {
        // An explicit path is used even when missing, so the read error surfaces
        if let Ok(path) = std::env::var("WEB_SEARCH_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        let mut candidates = vec![PathBuf::from("web-search-mcp.toml")];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("web-search-mcp").join("config.toml"));
        }

        candidates.into_iter().find(|p| p.exists())
    }

    /// Reject configurations the searcher cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let search = &self.search;
        if search.max_results == 0 {
            return Err(ConfigError("max_results must be greater than 0".into()));
        }
        if search.max_results_limit < search.max_results {
            return Err(ConfigError(
                "max_results_limit must be >= max_results".into(),
            ));
        }
        if search.timeout_seconds == 0 {
            return Err(ConfigError(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if search.strategies.is_empty() {
            return Err(ConfigError(
                "at least one search strategy must be enabled".into(),
            ));
        }
        for kind in &search.strategies {
            let backend = self.backend(*kind);
            if backend.base_url().is_empty() {
                return Err(ConfigError(format!("{kind:?} url must not be empty")));
            }
        }
        Ok(())
    }

    pub fn backend(&self, kind: StrategyKind) -> &BackendConfig {
        match kind {
            StrategyKind::DuckDuckGo => &self.duckduckgo,
            StrategyKind::Google => &self.google,
        }
    }
}
