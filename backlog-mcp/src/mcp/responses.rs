//! Response creation utilities for MCP tool operations
//!
//! Every tool result embeds a `_links.tools` map of forward-pointing
//! suggestions so a calling agent can chain actions without re-deriving
//! ids. The suggestion set per response is fixed: collection results link
//! each element onward, detail results link one level deeper, create
//! results link back to reads of the created entity.

use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::{json, Value};

use crate::links::{tool_call, tool_template};
use crate::types::{Comment, Issue, Project};

use super::tool_registry::BaseToolImpl;

/// Result shape for `list_projects`
pub fn list_projects_response(projects: &[Project]) -> Result<CallToolResult, McpError> {
    let items = projects
        .iter()
        .map(|p| Ok(with_tool_links(to_value(p)?, full_project_links(p))))
        .collect::<Result<Vec<_>, McpError>>()?;

    json_result(&json!({ "total": items.len(), "projects": items }))
}

/// Result shape for `get_project_details`
pub fn project_details_response(project: &Project) -> Result<CallToolResult, McpError> {
    let links = json!({
        "get_project_issues": get_project_issues_link(project.id),
        "create_issue": create_issue_link(project.id),
    });
    json_result(&with_tool_links(to_value(project)?, links))
}

/// Result shape for `get_project_issues`
pub fn project_issues_response(issues: &[Issue]) -> Result<CallToolResult, McpError> {
    let items = issues
        .iter()
        .map(|i| Ok(with_tool_links(to_value(i)?, full_issue_links(i))))
        .collect::<Result<Vec<_>, McpError>>()?;

    json_result(&json!({ "total": items.len(), "issues": items }))
}

/// Result shape for `get_issue_details`
pub fn issue_details_response(issue: &Issue) -> Result<CallToolResult, McpError> {
    let links = json!({
        "get_issue_comments": get_issue_comments_link(issue.id),
        "create_issue_comment": create_issue_comment_link(issue.id),
    });
    json_result(&with_tool_links(to_value(issue)?, links))
}

/// Result shape for `get_issue_comments`.
///
/// The parent issue id comes from the caller; comments do not embed it.
pub fn issue_comments_response(
    issue_id: u64,
    comments: &[Comment],
) -> Result<CallToolResult, McpError> {
    let items = comments
        .iter()
        .map(|c| {
            let links = json!({
                "create_issue_comment": create_issue_comment_link(issue_id),
            });
            Ok(with_tool_links(to_value(c)?, links))
        })
        .collect::<Result<Vec<_>, McpError>>()?;

    json_result(&json!({ "total": items.len(), "comments": items }))
}

/// Result shape for `create_issue`
pub fn created_issue_response(issue: &Issue) -> Result<CallToolResult, McpError> {
    json_result(&with_tool_links(to_value(issue)?, full_issue_links(issue)))
}

/// Result shape for `create_issue_comment`
pub fn created_comment_response(
    issue_id: u64,
    comment: &Comment,
) -> Result<CallToolResult, McpError> {
    let links = json!({
        "get_issue_comments": get_issue_comments_link(issue_id),
    });
    json_result(&with_tool_links(to_value(comment)?, links))
}

fn full_project_links(project: &Project) -> Value {
    json!({
        "get_project_details": tool_call(
            "get_project_details",
            json!({ "projectIdOrKey": project.project_key }),
        ),
        "get_project_issues": get_project_issues_link(project.id),
        "create_issue": create_issue_link(project.id),
    })
}

fn full_issue_links(issue: &Issue) -> Value {
    json!({
        "get_issue_details": tool_call(
            "get_issue_details",
            json!({ "issueIdOrKey": issue.issue_key }),
        ),
        "get_issue_comments": get_issue_comments_link(issue.id),
        "create_issue_comment": create_issue_comment_link(issue.id),
    })
}

fn get_project_issues_link(project_id: u64) -> Value {
    tool_call("get_project_issues", json!({ "projectId": project_id }))
}

fn create_issue_link(project_id: u64) -> Value {
    tool_template(
        "create_issue",
        json!({
            "projectId": project_id,
            "summary": "",
            "issueTypeId": null,
            "priorityId": null,
        }),
    )
}

fn get_issue_comments_link(issue_id: u64) -> Value {
    tool_call("get_issue_comments", json!({ "issueId": issue_id }))
}

fn create_issue_comment_link(issue_id: u64) -> Value {
    tool_template(
        "create_issue_comment",
        json!({ "issueId": issue_id, "content": "" }),
    )
}

fn to_value<T: serde::Serialize>(entity: &T) -> Result<Value, McpError> {
    serde_json::to_value(entity)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {e}"), None))
}

fn with_tool_links(mut value: Value, links: Value) -> Value {
    if let Value::Object(ref mut map) = value {
        map.insert("_links".to_string(), json!({ "tools": links }));
    }
    value
}

fn json_result(payload: &Value) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(payload)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {e}"), None))?;
    Ok(BaseToolImpl::create_success_response(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{comment_fixture, issue_fixture, project_fixture};
    use rmcp::model::RawContent;

    fn payload(result: &CallToolResult) -> Value {
        match &result.content[0].raw {
            RawContent::Text(text) => serde_json::from_str(&text.text).unwrap(),
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn test_list_projects_shape_and_suggestions() {
        let projects = vec![project_fixture(1, "DEV", "Dev", "d")];
        let result = list_projects_response(&projects).unwrap();
        let value = payload(&result);

        assert_eq!(value["total"], 1);
        let project = &value["projects"][0];
        assert_eq!(project["projectKey"], "DEV");

        let tools = &project["_links"]["tools"];
        assert_eq!(
            tools["get_project_details"]["arguments"]["projectIdOrKey"],
            "DEV"
        );
        assert_eq!(tools["get_project_issues"]["arguments"]["projectId"], 1);
        assert_eq!(tools["create_issue"]["template"]["projectId"], 1);
        assert_eq!(tools["create_issue"]["template"]["summary"], "");
        assert_eq!(
            tools.as_object().unwrap().len(),
            3,
            "no extra suggestions allowed"
        );
    }

    #[test]
    fn test_project_details_suggestions() {
        let result = project_details_response(&project_fixture(1, "DEV", "Dev", "d")).unwrap();
        let tools = payload(&result)["_links"]["tools"].clone();
        let mut keys: Vec<_> = tools.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["create_issue", "get_project_issues"]);
    }

    #[test]
    fn test_issue_detail_and_created_issue_templates() {
        let issue = issue_fixture(99, 1, "DEV-99", "Bug");

        let detail_tools = payload(&issue_details_response(&issue).unwrap())["_links"]["tools"].clone();
        assert_eq!(detail_tools.as_object().unwrap().len(), 2);
        assert_eq!(
            detail_tools["create_issue_comment"]["template"],
            json!({ "issueId": 99, "content": "" })
        );

        let created_tools = payload(&created_issue_response(&issue).unwrap())["_links"]["tools"].clone();
        assert_eq!(created_tools.as_object().unwrap().len(), 3);
        assert_eq!(
            created_tools["get_issue_details"]["arguments"]["issueIdOrKey"],
            "DEV-99"
        );
        assert_eq!(
            created_tools["create_issue_comment"]["template"],
            json!({ "issueId": 99, "content": "" })
        );
    }

    #[test]
    fn test_comment_shapes() {
        let comment = comment_fixture(500, "looks broken");

        let listed = payload(&issue_comments_response(99, &[comment.clone()]).unwrap());
        assert_eq!(listed["total"], 1);
        assert_eq!(
            listed["comments"][0]["_links"]["tools"]["create_issue_comment"]["template"]
                ["issueId"],
            99
        );

        let created = payload(&created_comment_response(99, &comment).unwrap());
        assert_eq!(
            created["_links"]["tools"]["get_issue_comments"]["arguments"]["issueId"],
            99
        );
        assert_eq!(created["_links"]["tools"].as_object().unwrap().len(), 1);
    }
}
