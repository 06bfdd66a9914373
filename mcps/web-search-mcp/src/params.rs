//! Parameter types for Web Search MCP tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchWebParams {
    #[schemars(description = "The search topic")]
    pub topic: String,

    #[schemars(description = "Maximum number of results to return (default: 10, capped by server config)")]
    pub num_results: Option<usize>,
}
