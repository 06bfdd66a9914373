//! MCP Common - Shared utilities for MCP servers
//!
//! - **Initialization**: [`init_tracing`] and [`serve_stdio`]
//! - **Results**: [`json_success`] / [`json_error`] for `CallToolResult` responses
//! - **Errors**: constructors for protocol-level `McpError`s
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process execution
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{init_tracing, serve_stdio, LogFormat};
//!
//! init_tracing("web_search_mcp", LogFormat::Text)?;
//! let server = WebSearchMcpServer::new(config)?;
//! serve_stdio(server).await?;
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

// Re-export commonly used items at crate root
pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::invalid_params;
pub use init::{init_tracing, serve_stdio, LogFormat};
pub use result::{content_json, json_error, json_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
