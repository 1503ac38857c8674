//! Issue creation tool for MCP operations
//!
//! The only tool besides comment creation that performs a state-changing
//! backend call. The created issue is echoed back with the full read/
//! comment suggestion set so the caller can keep chaining.

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::mcp::responses::created_issue_response;
use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::CreateIssueRequest;
use crate::types::NewIssue;

/// Tool for creating new issues
#[derive(Default)]
pub struct CreateIssueTool;

impl CreateIssueTool {
    /// Creates a new instance of the CreateIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateIssueTool {
    fn name(&self) -> &'static str {
        "create_issue"
    }

    fn description(&self) -> &'static str {
        "Create a new issue in a project"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "projectId": {
                    "type": "number",
                    "description": "Numeric id of the project the issue belongs to"
                },
                "summary": {
                    "type": "string",
                    "description": "One-line summary of the issue"
                },
                "issueTypeId": {
                    "type": "number",
                    "description": "Numeric id of the issue type"
                },
                "priorityId": {
                    "type": "number",
                    "description": "Numeric id of the priority"
                },
                "description": {
                    "type": "string",
                    "description": "Optional free-text description"
                }
            },
            "required": ["projectId", "summary", "issueTypeId", "priorityId"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: CreateIssueRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!(
            "Creating issue '{}' in project {}",
            request.summary,
            request.project_id
        );

        let new_issue = NewIssue {
            project_id: request.project_id,
            summary: request.summary,
            issue_type_id: request.issue_type_id,
            priority_id: request.priority_id,
            description: request.description,
        };

        let issue = context
            .api
            .create_issue(&new_issue)
            .await
            .map_err(|e| McpErrorHandler::handle_error(e, "create issue"))?;

        tracing::info!("Created issue {}", issue.issue_key);

        created_issue_response(&issue)
    }
}
