//! Tool registry for MCP operations
//!
//! Registry pattern replacing a single large match statement: each tool
//! declares its name, description and input schema, and the dispatcher is
//! a pure function of the registry plus the incoming request. The
//! registry is populated once at server construction and never mutated
//! afterwards.

use std::collections::BTreeMap;
use std::sync::Arc;

use rmcp::model::{Annotated, CallToolResult, RawContent, RawTextContent, Tool};
use rmcp::Error as McpError;

use crate::backend::BacklogApi;

/// Context shared by all tools during execution
#[derive(Clone)]
pub struct ToolContext {
    /// Backend the tools fetch from and write to
    pub api: Arc<dyn BacklogApi>,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(api: Arc<dyn BacklogApi>) -> Self {
        Self { api }
    }
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;

    /// Get the tool's JSON schema for arguments
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments and context
    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Registry for managing MCP tools.
///
/// Keyed by name in a sorted map so that `list_tools` output is stable
/// across calls.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn McpTool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool in the registry
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Box::new(tool));
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// List all registered tool names
    pub fn list_tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Get all registered tools as Tool objects for the list_tools response
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools
            .values()
            .map(|tool| {
                let schema = tool.schema();
                let schema_map = if let serde_json::Value::Object(map) = schema {
                    map
                } else {
                    serde_json::Map::new()
                };

                Tool {
                    name: tool.name().into(),
                    description: Some(tool.description().into()),
                    input_schema: Arc::new(schema_map),
                    annotations: None,
                }
            })
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Base implementation providing common utility methods for MCP tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed struct.
    ///
    /// A missing or mis-typed field fails with an invalid-request error
    /// whose message names the offending field.
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<T, McpError> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| McpError::invalid_request(format!("Invalid arguments: {e}"), None))
    }

    /// Create a success response with serializable content
    pub fn create_success_response<T: Into<String>>(content: T) -> CallToolResult {
        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent {
                    text: content.into(),
                }),
                None,
            )],
            is_error: Some(false),
        }
    }

    /// Create an error response with the given error message
    pub fn create_error_response<T: Into<String>>(error: T) -> CallToolResult {
        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent { text: error.into() }),
                None,
            )],
            is_error: Some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBacklogApi;
    use rmcp::model::RawContent;

    struct MockTool {
        name: &'static str,
        description: &'static str,
    }

    #[async_trait::async_trait]
    impl McpTool for MockTool {
        fn name(&self) -> &'static str {
            self.name
        }

        fn description(&self) -> &'static str {
            self.description
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
            _arguments: serde_json::Map<String, serde_json::Value>,
            _context: &ToolContext,
        ) -> std::result::Result<CallToolResult, McpError> {
            Ok(BaseToolImpl::create_success_response(format!(
                "Mock tool {} executed",
                self.name
            )))
        }
    }

    #[test]
    fn test_tool_registration_and_lookup() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(MockTool {
            name: "test_tool",
            description: "A test tool",
        });

        assert_eq!(registry.len(), 1);
        assert!(registry.get_tool("test_tool").is_some());
        assert!(registry.get_tool("nonexistent").is_none());
        assert_eq!(
            registry.get_tool("test_tool").unwrap().description(),
            "A test tool"
        );
    }

    #[test]
    fn test_list_tools_is_sorted_and_stable() {
        let mut registry = ToolRegistry::new();
        registry.register(MockTool {
            name: "zeta",
            description: "last",
        });
        registry.register(MockTool {
            name: "alpha",
            description: "first",
        });

        let names: Vec<_> = registry.list_tools().iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);

        let again: Vec<_> = registry.list_tools().iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, again);
    }

    #[tokio::test]
    async fn test_tool_execution() {
        let context = ToolContext::new(Arc::new(MockBacklogApi::new()));
        let tool = MockTool {
            name: "exec_test",
            description: "Execution test tool",
        };

        let result = tool.execute(serde_json::Map::new(), &context).await.unwrap();
        assert_eq!(result.is_error, Some(false));
        assert!(!result.content.is_empty());
    }

    #[test]
    fn test_parse_arguments_names_missing_field() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug)]
        #[serde(rename_all = "camelCase")]
        struct TestArgs {
            #[allow(dead_code)]
            project_id: u64,
        }

        let result: Result<TestArgs, McpError> = BaseToolImpl::parse_arguments(serde_json::Map::new());
        let err = result.unwrap_err();
        assert!(err.message.contains("projectId"));
    }

    #[test]
    fn test_response_constructors() {
        let ok = BaseToolImpl::create_success_response("fine");
        assert_eq!(ok.is_error, Some(false));
        if let RawContent::Text(text) = &ok.content[0].raw {
            assert_eq!(text.text, "fine");
        } else {
            panic!("expected text content");
        }

        let err = BaseToolImpl::create_error_response("broken");
        assert_eq!(err.is_error, Some(true));
    }
}
