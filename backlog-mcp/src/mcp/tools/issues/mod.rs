//! Issue tools for MCP operations

pub mod comment;
pub mod comments;
pub mod create;
pub mod get;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all issue-related tools with the registry
pub fn register_issue_tools(registry: &mut ToolRegistry) {
    registry.register(get::GetIssueDetailsTool::new());
    registry.register(comments::GetIssueCommentsTool::new());
    registry.register(create::CreateIssueTool::new());
    registry.register(comment::CreateIssueCommentTool::new());
}
