//! Project tools for MCP operations

pub mod get;
pub mod issues;
pub mod list;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all project-related tools with the registry
pub fn register_project_tools(registry: &mut ToolRegistry) {
    registry.register(list::ListProjectsTool::new());
    registry.register(get::GetProjectDetailsTool::new());
    registry.register(issues::GetProjectIssuesTool::new());
}
