//! Unified error handling for the Backlog MCP library
//!
//! One typed hierarchy covers the whole request path: input validation,
//! routing, the outbound HTTP call and payload (de)serialization. The
//! protocol layer maps these onto MCP error responses in
//! [`crate::mcp::shared_utils`].

use thiserror::Error;

/// The main error type for the Backlog MCP library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BacklogMcpError {
    /// Missing or malformed required input (URI segment, id, or tool argument)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown tool/prompt/resource path, or an entity the backend does not have
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport-level failure of an outbound call
    #[error("Backlog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the tracker, body captured for diagnosis
    #[error("Backlog API returned {status} during {operation}: {body}")]
    Api {
        /// The client operation that made the call
        operation: &'static str,
        /// HTTP status code of the response
        status: u16,
        /// Response body as returned by the tracker
        body: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias used throughout the library
pub type Result<T> = std::result::Result<T, BacklogMcpError>;
