//! Error helpers for MCP tool implementations
//!
//! Protocol-level errors are reserved for requests the server cannot
//! accept at all (bad parameters, internal faults). Failures a client
//! should read and act on belong in a tool result instead, see
//! [`crate::result::json_error`].

use rmcp::ErrorData as McpError;

/// Create an internal error with a message
pub(crate) fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}

/// Create an invalid params error with a message
///
/// Use this when the tool receives parameters it can never satisfy,
/// such as an empty search topic.
pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    #[test]
    fn test_internal_error() {
        let err = internal_error("backend exploded");
        assert!(err.message.contains("backend exploded"));
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    }

    #[test]
    fn test_invalid_params() {
        let err = invalid_params("topic must not be empty");
        assert!(err.message.contains("topic"));
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }
}
