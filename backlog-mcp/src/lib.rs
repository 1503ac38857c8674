//! # Backlog MCP
//!
//! An MCP (Model Context Protocol) adapter for a Backlog-style issue
//! tracker. The library translates protocol requests into REST calls
//! against the tracker's `/api/v2` surface and reshapes the responses
//! into protocol payloads enriched with `_links` cross-references.
//!
//! ## Features
//!
//! - **Tools**: schema-validated actions (list/read projects and issues,
//!   create issues and comments), each result carrying callable
//!   next-action suggestions
//! - **Resources**: read-only JSON views addressed by `backlog:///` URIs
//! - **Prompts**: templates guiding an agent through tool chains,
//!   including a live bug-triage aggregation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use backlog_mcp::{BacklogClient, Config, McpServer};
//!
//! let config = Config::from_env();
//! let client = BacklogClient::new(&config);
//! let server = McpServer::new(Arc::new(client));
//! // hand `server` to rmcp::serve_server with a transport
//! ```

#![warn(missing_docs)]

/// Outbound client for the issue-tracker REST API
pub mod backend;

/// Environment-sourced configuration
pub mod config;

/// Error types used throughout the library
pub mod error;

/// URI builders and `_links` record shapes
pub mod links;

/// Model Context Protocol (MCP) server support
pub mod mcp;

/// Prompt templates served over the protocol
pub mod prompts;

/// Resource URI routing and projections
pub mod resources;

/// Data-transfer shapes for the tracker's JSON payloads
pub mod types;

// Re-export core types
pub use backend::{BacklogApi, BacklogClient, MockBacklogApi};
pub use config::Config;
pub use error::{BacklogMcpError, Result};
pub use mcp::McpServer;
pub use prompts::PromptLibrary;
pub use resources::{ResourcePath, ResourceRouter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
