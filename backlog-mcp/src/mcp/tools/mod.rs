//! MCP tool implementations
//!
//! Tools are organized by entity category, one submodule per tool, and
//! registered into the [`ToolRegistry`](crate::mcp::tool_registry::ToolRegistry)
//! by the per-category registration functions.

pub mod issues;
pub mod projects;

pub use issues::register_issue_tools;
pub use projects::register_project_tools;
