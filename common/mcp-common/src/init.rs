//! Server initialization utilities
//!
//! Tracing setup and the stdio serve loop shared by MCP servers in this
//! workspace. Servers that need configuration before construction build
//! themselves and then hand the instance to [`serve_stdio`].

use rmcp::{transport::stdio, ServerHandler, ServiceExt};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for log lines written to stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line output
    #[default]
    Text,
    /// One JSON object per line, for log aggregation
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT` from the environment, if set to a known value
    pub fn from_env() -> Option<Self> {
        std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|v| Self::parse(&v))
    }

    /// Parse a format name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "text" | "pretty" => Some(LogFormat::Text),
            _ => None,
        }
    }
}

/// Initialize tracing/logging for an MCP server
///
/// Logs go to stderr since stdout carries the MCP protocol. `RUST_LOG`
/// filters as usual, with `<crate_name>=info` added as a baseline.
/// `LOG_FORMAT` in the environment wins over the `format` argument.
///
/// # Example
///
/// ```rust,ignore
/// mcp_common::init_tracing("web_search_mcp", LogFormat::Text)?;
/// ```
pub fn init_tracing(crate_name: &str, format: LogFormat) -> anyhow::Result<()> {
    let directive = format!("{}=info", crate_name);
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let format = LogFormat::from_env().unwrap_or(format);
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?,
    }

    Ok(())
}

/// Serve an already constructed MCP server over stdio until the client disconnects
pub async fn serve_stdio<S>(server: S) -> anyhow::Result<()>
where
    S: ServerHandler,
{
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    let reason = service.waiting().await?;

    tracing::info!(?reason, "Server shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_format() {
        assert_eq!(LogFormat::parse("json"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" JSON "), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse("text"), Some(LogFormat::Text));
        assert_eq!(LogFormat::parse("yaml"), None);
    }

    #[test]
    fn test_log_format_serde() {
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, LogFormat::Json);
        assert_eq!(serde_json::to_string(&LogFormat::Text).unwrap(), "\"text\"");
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }
}
