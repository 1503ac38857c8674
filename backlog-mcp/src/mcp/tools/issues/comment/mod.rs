//! Issue comment creation tool

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::mcp::responses::created_comment_response;
use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::CreateIssueCommentRequest;
use crate::types::NewComment;

/// Tool for adding a comment to an issue
#[derive(Default)]
pub struct CreateIssueCommentTool;

impl CreateIssueCommentTool {
    /// Creates a new instance of the CreateIssueCommentTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateIssueCommentTool {
    fn name(&self) -> &'static str {
        "create_issue_comment"
    }

    fn description(&self) -> &'static str {
        "Add a comment to an issue"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issueId": {
                    "type": "number",
                    "description": "Numeric id of the issue to comment on"
                },
                "content": {
                    "type": "string",
                    "description": "Comment body"
                }
            },
            "required": ["issueId", "content"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: CreateIssueCommentRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Commenting on issue {}", request.issue_id);

        let comment = context
            .api
            .create_comment(
                &request.issue_id.to_string(),
                &NewComment {
                    content: request.content,
                },
            )
            .await
            .map_err(|e| McpErrorHandler::handle_error(e, "create comment"))?;

        created_comment_response(request.issue_id, &comment)
    }
}
