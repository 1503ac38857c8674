//! Shared utilities for MCP operations
//!
//! Centralizes the mapping from library errors onto protocol errors so
//! every handler logs and classifies failures the same way.

use rmcp::Error as McpError;

use crate::error::BacklogMcpError;

/// Common error handling patterns for MCP operations
pub struct McpErrorHandler;

impl McpErrorHandler {
    /// Convert a library error to the appropriate MCP error response.
    ///
    /// - Input validation failures -> invalid_request
    /// - Missing entities/paths -> resource_not_found
    /// - Backend and serialization failures -> internal_error
    ///
    /// The failure is logged with its operation context before being
    /// wrapped; nothing is dropped silently.
    pub fn handle_error(error: BacklogMcpError, operation: &str) -> McpError {
        tracing::error!("MCP operation '{}' failed: {}", operation, error);

        match error {
            BacklogMcpError::InvalidRequest(msg) => McpError::invalid_request(msg, None),
            BacklogMcpError::NotFound(msg) => McpError::resource_not_found(msg, None),
            BacklogMcpError::Http(err) => {
                McpError::internal_error(format!("Backlog request failed: {err}"), None)
            }
            BacklogMcpError::Api {
                operation: api_op,
                status,
                body,
            } => McpError::internal_error(
                format!("Backlog API returned {status} during {api_op}: {body}"),
                None,
            ),
            BacklogMcpError::Json(err) => {
                McpError::internal_error(format!("JSON error: {err}"), None)
            }
            BacklogMcpError::Other(msg) => McpError::internal_error(msg, None),
        }
    }
}
