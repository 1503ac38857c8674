//! Request types for MCP tool operations
//!
//! One strongly-typed request struct per tool. Validation happens by
//! construction: deserializing the argument blob into the struct fails
//! with a message naming any missing or mis-typed field.

use serde::Deserialize;

/// Request to list all projects
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListProjectsRequest {
    // No parameters needed
}

/// Request to fetch a single project
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectDetailsRequest {
    /// Numeric project id or project key
    pub project_id_or_key: String,
}

/// Request to list a project's issues
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectIssuesRequest {
    /// Numeric project id
    pub project_id: u64,
}

/// Request to fetch a single issue
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetIssueDetailsRequest {
    /// Numeric issue id or issue key
    pub issue_id_or_key: String,
}

/// Request to list an issue's comments
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetIssueCommentsRequest {
    /// Numeric issue id
    pub issue_id: u64,
}

/// Request to create a new issue
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueRequest {
    /// Target project id
    pub project_id: u64,
    /// One-line summary
    pub summary: String,
    /// Issue type id
    pub issue_type_id: u64,
    /// Priority id
    pub priority_id: u64,
    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,
}

/// Request to add a comment to an issue
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueCommentRequest {
    /// Numeric issue id
    pub issue_id: u64,
    /// Comment body
    pub content: String,
}
