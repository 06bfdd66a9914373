//! In-process tool execution
//!
//! [`EmbeddableMcp`] lets a host call a server's tools directly, without a
//! transport in between. Servers dispatch by tool name to the same methods
//! their `#[tool_router]` exposes, so the in-process path and the stdio
//! path share one implementation.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Error type for embeddable MCP operations
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    /// Tool was not found in the server
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Parameters did not deserialize into the tool's parameter type
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// The tool returned a protocol-level error
    #[error("mcp error: {0}")]
    McpError(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::McpError(err.message.to_string())
    }
}

/// Result type for embeddable MCP operations
pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// Trait for MCP servers that can be executed in-process
///
/// Implementations must be `Send + Sync` so one server instance can serve
/// concurrent calls from several tasks.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Returns the server name used in MCP configuration files
    fn server_name(&self) -> &str;

    /// Returns all tools with their names, descriptions and input schemas
    fn list_tools(&self) -> Vec<Tool>;

    /// Executes a tool by name with a JSON object of parameters
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    /// Returns an optional description of the server
    fn server_description(&self) -> Option<&str> {
        None
    }

    /// Returns the server version, if available
    fn server_version(&self) -> Option<&str> {
        None
    }
}
