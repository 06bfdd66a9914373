//! Web Search MCP Library
//!
//! Web search with ordered fallback: DuckDuckGo's HTML endpoint first,
//! Google's results page when that fails. Results are normalized
//! (trimmed, de-duplicated by URL, truncated) before they are returned.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use web_search_mcp::{Config, Searcher};
//!
//! let searcher = Searcher::from_config(&Config::default())?;
//! let results = searcher.search("open source license comparison", 10).await?;
//! ```
//!
//! # Configuration
//! See [`config`] for file locations and environment overrides.

pub mod backends;
pub mod config;
pub mod error;
pub mod handlers;
pub mod normalize;
pub mod params;
pub mod searcher;
pub mod server;
pub mod types;

// Re-export main server type
pub use server::WebSearchMcpServer;

pub use config::Config;
pub use error::{FailureKind, SearchError, StrategyFailure};
pub use params::SearchWebParams;
pub use searcher::{AttemptOutcome, AttemptRecord, SearchObserver, Searcher};
pub use types::{SearchResponse, SearchResult};
