//! Project listing tool for MCP operations
//!
//! Returns every project visible to the configured API key, each carrying
//! the suggestion set for drilling into details, issues, or creating an
//! issue in that project.

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::mcp::responses::list_projects_response;
use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::ListProjectsRequest;

/// Tool for listing all projects
#[derive(Default)]
pub struct ListProjectsTool;

impl ListProjectsTool {
    /// Creates a new instance of the ListProjectsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListProjectsTool {
    fn name(&self) -> &'static str {
        "list_projects"
    }

    fn description(&self) -> &'static str {
        "List all projects in the Backlog space with links to follow-up tools"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let _request: ListProjectsRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Listing projects");

        let projects = context
            .api
            .list_projects()
            .await
            .map_err(|e| McpErrorHandler::handle_error(e, "list projects"))?;

        list_projects_response(&projects)
    }
}
