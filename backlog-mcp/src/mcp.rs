//! Model Context Protocol (MCP) server support
//!
//! [`McpServer`] owns the immutable tool registry, the resource router
//! and the prompt library, and implements rmcp's `ServerHandler` over
//! them. Error propagation is deliberately asymmetric: resource and
//! prompt handlers fail hard with typed protocol errors, while any
//! failure inside a tool invocation is caught and re-emitted as a
//! successful protocol response whose payload is `{"error": <message>}`,
//! so a driving agent always receives parseable text.

use std::sync::Arc;

use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};
use serde_json::Value;

use crate::backend::BacklogApi;
use crate::error::BacklogMcpError;
use crate::prompts::PromptLibrary;
use crate::resources::ResourceRouter;

/// MCP module structure
pub mod responses;
pub mod shared_utils;
pub mod tool_registry;
pub mod tools;
pub mod types;

use shared_utils::McpErrorHandler;
use tool_registry::{BaseToolImpl, ToolContext, ToolRegistry};
use tools::{register_issue_tools, register_project_tools};

/// MCP server translating protocol requests into tracker calls
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    tool_context: Arc<ToolContext>,
    resources: ResourceRouter,
    prompts: PromptLibrary,
}

impl McpServer {
    /// Create a server over the given backend.
    ///
    /// The tool registry is populated here, once; the dispatcher never
    /// mutates it afterwards.
    pub fn new(api: Arc<dyn BacklogApi>) -> Self {
        let mut tool_registry = ToolRegistry::new();
        register_project_tools(&mut tool_registry);
        register_issue_tools(&mut tool_registry);

        Self {
            tool_registry: Arc::new(tool_registry),
            tool_context: Arc::new(ToolContext::new(Arc::clone(&api))),
            resources: ResourceRouter::new(Arc::clone(&api)),
            prompts: PromptLibrary::new(api),
        }
    }

    /// Invoke a tool, converting every failure into a soft JSON error
    /// payload. The protocol response is a success either way.
    pub async fn handle_tool_call(
        &self,
        name: &str,
        arguments: Option<serde_json::Map<String, Value>>,
    ) -> CallToolResult {
        match self.dispatch_tool(name, arguments).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Tool '{}' failed: {}", name, e.message);
                Self::soft_error_response(e.message.as_ref())
            }
        }
    }

    /// Resolve and run one tool invocation against the registry.
    ///
    /// Argument presence is checked once here, centrally; each tool then
    /// re-validates its own required fields while parsing.
    async fn dispatch_tool(
        &self,
        name: &str,
        arguments: Option<serde_json::Map<String, Value>>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let tool = self
            .tool_registry
            .get_tool(name)
            .ok_or_else(|| McpError::resource_not_found(format!("Unknown tool: {name}"), None))?;

        let arguments = arguments
            .ok_or_else(|| McpError::invalid_request("No arguments provided", None))?;

        tool.execute(arguments, &self.tool_context).await
    }

    /// Read a resource URI into its protocol contents
    pub async fn read_resource_by_uri(
        &self,
        uri: &str,
    ) -> std::result::Result<ReadResourceResult, McpError> {
        let value = self
            .resources
            .read(uri)
            .await
            .map_err(|e| McpErrorHandler::handle_error(e, "read resource"))?;

        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {e}"), None))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: Some("application/json".to_string()),
                text,
            }],
        })
    }

    /// Produce the named prompt's message sequence
    pub async fn get_prompt_by_name(
        &self,
        name: &str,
    ) -> std::result::Result<GetPromptResult, McpError> {
        match self.prompts.get(name).await {
            Ok(result) => Ok(result),
            Err(BacklogMcpError::NotFound(_)) => {
                tracing::warn!("Prompt '{}' not found", name);
                Err(McpError::invalid_request(
                    format!("Prompt '{name}' is not available. It may have been deleted or renamed."),
                    None,
                ))
            }
            Err(e) => Err(McpErrorHandler::handle_error(e, "get prompt")),
        }
    }

    fn soft_error_response(message: &str) -> CallToolResult {
        let body = serde_json::json!({ "error": message });
        BaseToolImpl::create_error_response(body.to_string())
    }

    fn capabilities() -> ServerCapabilities {
        ServerCapabilities {
            experimental: None,
            logging: None,
            completions: None,
            prompts: Some(PromptsCapability { list_changed: None }),
            resources: Some(ResourcesCapability {
                subscribe: None,
                list_changed: None,
            }),
            tools: Some(ToolsCapability { list_changed: None }),
        }
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            server_info: Implementation {
                name: "backlog-mcp".into(),
                version: crate::VERSION.into(),
            },
            instructions: Some(
                "Backlog MCP server exposing an issue-tracking space as tools, resources and \
                 prompts. Start with list_projects; every tool result embeds a _links.tools map \
                 naming the next call and its arguments. Read-only views are also addressable as \
                 backlog:/// resources, and the bug_triage prompt collects issues mentioning \
                 bugs across all projects."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        Ok(self.handle_tool_call(&request.name, request.arguments).await)
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, McpError> {
        match self.resources.list().await {
            Ok(resources) => Ok(ListResourcesResult {
                resources,
                next_cursor: None,
            }),
            Err(e) => {
                tracing::error!("Failed to list resources: {}", e);
                Err(McpError::internal_error(
                    format!("Failed to list resources: {e}"),
                    None,
                ))
            }
        }
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, McpError> {
        self.read_resource_by_uri(&request.uri).await
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            prompts: self.prompts.list(),
            next_cursor: None,
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        self.get_prompt_by_name(&request.name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{issue_fixture, project_fixture, MockBacklogApi};

    fn server(api: MockBacklogApi) -> McpServer {
        McpServer::new(Arc::new(api))
    }

    fn payload(result: &CallToolResult) -> Value {
        match &result.content[0].raw {
            RawContent::Text(text) => serde_json::from_str(&text.text).unwrap(),
            other => panic!("expected text content, got {other:?}"),
        }
    }

    fn arguments(value: Value) -> serde_json::Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_get_info_declares_all_capabilities() {
        let info = server(MockBacklogApi::new()).get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_some());
        assert_eq!(info.server_info.name, "backlog-mcp");
    }

    #[test]
    fn test_registry_holds_the_full_tool_set() {
        let server = server(MockBacklogApi::new());
        let names = server.tool_registry.list_tool_names();
        for expected in [
            "create_issue",
            "create_issue_comment",
            "get_issue_comments",
            "get_issue_details",
            "get_project_details",
            "get_project_issues",
            "list_projects",
        ] {
            assert!(names.contains(&expected.to_string()), "missing {expected}");
        }
        assert_eq!(names.len(), 7);
    }

    #[tokio::test]
    async fn test_list_then_call_scenario() {
        let server = server(
            MockBacklogApi::new().with_project(project_fixture(1, "DEV", "Dev", "d")),
        );

        let tools = server.tool_registry.list_tools();
        let list_projects = tools
            .iter()
            .find(|t| t.name == "list_projects")
            .expect("list_projects must be listed");
        assert_eq!(
            list_projects.input_schema["required"],
            serde_json::json!([])
        );

        let result = server
            .handle_tool_call("list_projects", Some(serde_json::Map::new()))
            .await;
        let value = payload(&result);
        assert_eq!(value["total"], 1);
        assert_eq!(value["projects"][0]["projectKey"], "DEV");
        assert!(value["projects"][0]["_links"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_tool_is_a_soft_error() {
        let result = server(MockBacklogApi::new())
            .handle_tool_call("frobnicate", Some(serde_json::Map::new()))
            .await;

        let value = payload(&result);
        assert_eq!(value, serde_json::json!({ "error": "Unknown tool: frobnicate" }));
    }

    #[tokio::test]
    async fn test_absent_arguments_is_a_soft_error() {
        let result = server(MockBacklogApi::new())
            .handle_tool_call("list_projects", None)
            .await;

        let value = payload(&result);
        assert_eq!(value["error"], "No arguments provided");
    }

    #[tokio::test]
    async fn test_missing_field_soft_error_names_the_field() {
        let result = server(MockBacklogApi::new())
            .handle_tool_call(
                "create_issue",
                Some(arguments(serde_json::json!({
                    "projectId": 1,
                    "summary": "Bug",
                    "issueTypeId": 2
                }))),
            )
            .await;

        let value = payload(&result);
        let message = value["error"].as_str().unwrap();
        assert!(message.contains("priorityId"), "got: {message}");
    }

    #[tokio::test]
    async fn test_backend_failure_stays_inside_the_payload() {
        let result = server(MockBacklogApi::failing())
            .handle_tool_call("list_projects", Some(serde_json::Map::new()))
            .await;

        let value = payload(&result);
        assert!(value["error"].as_str().unwrap().contains("backend unavailable"));
    }

    #[tokio::test]
    async fn test_create_then_chain_scenario() {
        let server = server(
            MockBacklogApi::new()
                .with_project(project_fixture(1, "DEV", "Dev", "d"))
                .with_next_issue_id(99),
        );

        let result = server
            .handle_tool_call(
                "create_issue",
                Some(arguments(serde_json::json!({
                    "projectId": 1,
                    "summary": "Bug",
                    "issueTypeId": 2,
                    "priorityId": 2
                }))),
            )
            .await;

        let value = payload(&result);
        assert_eq!(value["issueKey"], "DEV-99");
        assert_eq!(
            value["_links"]["tools"]["create_issue_comment"]["template"],
            serde_json::json!({ "issueId": 99, "content": "" })
        );
    }

    #[tokio::test]
    async fn test_read_resource_echoes_request_uri() {
        let server = server(
            MockBacklogApi::new().with_issue(issue_fixture(99, 1, "DEV-99", "Bug")),
        );

        let result = server
            .read_resource_by_uri("backlog:///issue/99")
            .await
            .unwrap();
        match &result.contents[0] {
            ResourceContents::TextResourceContents { uri, text, .. } => {
                assert_eq!(uri, "backlog:///issue/99");
                let value: Value = serde_json::from_str(text).unwrap();
                assert_eq!(value["_links"]["self"], "backlog:///issue/99");
            }
            other => panic!("expected text contents, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_resource_uri_fails_hard() {
        let err = server(MockBacklogApi::new())
            .read_resource_by_uri("backlog:///widget/5")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_prompt_fails_hard() {
        let err = server(MockBacklogApi::new())
            .get_prompt_by_name("nonexistent")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_REQUEST);
    }
}
