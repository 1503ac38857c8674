//! Single-project lookup tool

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::mcp::responses::project_details_response;
use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetProjectDetailsRequest;

/// Tool for fetching a single project by id or key
#[derive(Default)]
pub struct GetProjectDetailsTool;

impl GetProjectDetailsTool {
    /// Creates a new instance of the GetProjectDetailsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetProjectDetailsTool {
    fn name(&self) -> &'static str {
        "get_project_details"
    }

    fn description(&self) -> &'static str {
        "Fetch one project by numeric id or project key"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "projectIdOrKey": {
                    "type": "string",
                    "description": "Numeric project id or project key (e.g. DEV)"
                }
            },
            "required": ["projectIdOrKey"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetProjectDetailsRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Fetching project {}", request.project_id_or_key);

        let project = context
            .api
            .get_project(&request.project_id_or_key)
            .await
            .map_err(|e| McpErrorHandler::handle_error(e, "get project"))?;

        project_details_response(&project)
    }
}
