//! Web Search MCP Server
//!
//! Searches the web for a topic, falling back from DuckDuckGo to Google.
//!
//! # Usage
//!
//! Run directly: `web-search-mcp`
//!
//! Or configure in `.mcp.json`:
//! ```json
//! { "mcpServers": { "web-search": { "command": "./web-search-mcp" } } }
//! ```

use web_search_mcp::{Config, WebSearchMcpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_path) = Config::load()?;
    mcp_common::init_tracing("web_search_mcp", config.logging.format)?;

    match config_path {
        Some(path) => tracing::info!("Loaded config from: {}", path.display()),
        None => tracing::info!("No config file found, using defaults"),
    }
    tracing::info!("Starting Web Search MCP Server");

    let server = WebSearchMcpServer::new(config)?;
    mcp_common::serve_stdio(server).await
}
