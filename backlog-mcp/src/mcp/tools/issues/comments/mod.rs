//! Issue comment listing tool

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::mcp::responses::issue_comments_response;
use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetIssueCommentsRequest;

/// Tool for listing the comments of one issue
#[derive(Default)]
pub struct GetIssueCommentsTool;

impl GetIssueCommentsTool {
    /// Creates a new instance of the GetIssueCommentsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetIssueCommentsTool {
    fn name(&self) -> &'static str {
        "get_issue_comments"
    }

    fn description(&self) -> &'static str {
        "List the comments of an issue in creation order"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issueId": {
                    "type": "number",
                    "description": "Numeric id of the issue to list comments for"
                }
            },
            "required": ["issueId"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetIssueCommentsRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Listing comments for issue {}", request.issue_id);

        let comments = context
            .api
            .list_comments(&request.issue_id.to_string())
            .await
            .map_err(|e| McpErrorHandler::handle_error(e, "list comments"))?;

        issue_comments_response(request.issue_id, &comments)
    }
}
