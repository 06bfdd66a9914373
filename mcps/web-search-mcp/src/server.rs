//! MCP Server implementation for web search
//!
//! This module defines the MCP server that exposes the fallback searcher
//! as tools. Handler implementations are in the handlers module.

use mcp_common::{
    async_trait, CallToolResult, EmbeddableError, EmbeddableMcp, EmbeddableResult, McpError, Tool,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::config::Config;
use crate::error::ConfigError;
use crate::handlers;
use crate::params::SearchWebParams;
use crate::searcher::Searcher;

const INSTRUCTIONS: &str = "Web Search MCP Server - searches the web for a topic and returns \
     titles, URLs and snippets. Tries DuckDuckGo first and falls back to Google when the \
     primary engine fails. No API keys required.";

/// The main Web Search MCP Server
#[derive(Clone)]
pub struct WebSearchMcpServer {
    searcher: Searcher,
    config: Config,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl WebSearchMcpServer {
    /// Create a server with the configured strategies
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let searcher = Searcher::from_config(&config)?;
        tracing::info!(
            "Search strategies (in order): {}",
            searcher.strategy_names().join(" -> ")
        );
        Ok(Self::with_searcher(config, searcher))
    }

    /// Create a server around an already built searcher
    pub fn with_searcher(config: Config, searcher: Searcher) -> Self {
        Self {
            searcher,
            config,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search the web for the given topic. Returns the topic, a list of results (title, url, snippet), their count, the engine used and the search time."
    )]
    async fn search_web(
        &self,
        Parameters(params): Parameters<SearchWebParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::search_web(&self.searcher, &self.config, params).await
    }

    #[tool(description = "Describe the search service: engines in fallback order, result limits and timeout.")]
    async fn get_search_info(&self) -> Result<CallToolResult, McpError> {
        handlers::get_search_info(&self.searcher, &self.config)
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for WebSearchMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for WebSearchMcpServer {
    fn server_name(&self) -> &str {
        "web-search"
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn server_version(&self) -> Option<&str> {
        Some(env!("CARGO_PKG_VERSION"))
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "search_web" => {
                let params: SearchWebParams = serde_json::from_value(params)?;
                self.search_web(Parameters(params)).await.map_err(Into::into)
            }

            "get_search_info" => self.get_search_info().await.map_err(Into::into),

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}
