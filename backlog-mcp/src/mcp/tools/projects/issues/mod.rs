//! Project issue listing tool

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::mcp::responses::project_issues_response;
use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetProjectIssuesRequest;

/// Tool for listing the issues of one project
#[derive(Default)]
pub struct GetProjectIssuesTool;

impl GetProjectIssuesTool {
    /// Creates a new instance of the GetProjectIssuesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetProjectIssuesTool {
    fn name(&self) -> &'static str {
        "get_project_issues"
    }

    fn description(&self) -> &'static str {
        "List the issues of a project, each with links to follow-up tools"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "projectId": {
                    "type": "number",
                    "description": "Numeric id of the project to list issues for"
                }
            },
            "required": ["projectId"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetProjectIssuesRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Listing issues for project {}", request.project_id);

        let issues = context
            .api
            .list_issues(Some(&request.project_id.to_string()))
            .await
            .map_err(|e| McpErrorHandler::handle_error(e, "list issues"))?;

        project_issues_response(&issues)
    }
}
