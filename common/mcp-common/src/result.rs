//! Result helpers for MCP tool responses
//!
//! Tools in this workspace answer with pretty-printed JSON text content.
//! Successful calls use [`json_success`]; failures the caller should be
//! able to inspect (rather than a protocol error) use [`json_error`],
//! which sets `is_error` on the result.

use rmcp::{
    model::{CallToolResult, Content, RawContent},
    ErrorData as McpError,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::internal_error;

fn to_pretty_json<T: Serialize>(data: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(data)
        .map_err(|e| internal_error(format!("failed to serialize tool result: {e}")))
}

/// Create a successful JSON response from any serializable data
///
/// # Example
///
/// ```rust,ignore
/// use mcp_common::json_success;
///
/// fn get_search_info(&self) -> Result<CallToolResult, McpError> {
///     json_success(&self.info())
/// }
/// ```
pub fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(to_pretty_json(
        data,
    )?)]))
}

/// Create a tool-level error response carrying a JSON body
///
/// The call itself succeeds at the protocol level; `is_error` tells the
/// client the tool could not do its job and the body says why.
pub fn json_error<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(to_pretty_json(
        data,
    )?)]))
}

/// Parse the first text content of a tool result as JSON
///
/// Returns `None` when the result has no text content or the text is not
/// valid JSON. Mostly useful to embedders and tests driving tools in-process.
pub fn content_json(result: &CallToolResult) -> Option<Value> {
    result.content.iter().find_map(|c| match &c.raw {
        RawContent::Text(text) => serde_json::from_str(&text.text).ok(),
        _ => None,
    })
}
