//! Single-issue lookup tool

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::mcp::responses::issue_details_response;
use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetIssueDetailsRequest;

/// Tool for fetching a single issue by id or key
#[derive(Default)]
pub struct GetIssueDetailsTool;

impl GetIssueDetailsTool {
    /// Creates a new instance of the GetIssueDetailsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetIssueDetailsTool {
    fn name(&self) -> &'static str {
        "get_issue_details"
    }

    fn description(&self) -> &'static str {
        "Fetch one issue by numeric id or issue key"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issueIdOrKey": {
                    "type": "string",
                    "description": "Numeric issue id or issue key (e.g. DEV-42)"
                }
            },
            "required": ["issueIdOrKey"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetIssueDetailsRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Fetching issue {}", request.issue_id_or_key);

        let issue = context
            .api
            .get_issue(&request.issue_id_or_key)
            .await
            .map_err(|e| McpErrorHandler::handle_error(e, "get issue"))?;

        issue_details_response(&issue)
    }
}
