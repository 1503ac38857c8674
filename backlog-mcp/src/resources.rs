//! Resource URI routing and projections
//!
//! Resources are read-only JSON views addressed by `backlog:///` URIs.
//! A URI is parsed into an explicit [`ResourcePath`] shape first, then
//! each shape maps to exactly one backend fetch and one projection.
//! Nothing is cached; every read re-fetches from the tracker.

use std::sync::Arc;

use rmcp::model::{Annotated, RawResource, Resource};
use serde_json::{json, Value};

use crate::backend::BacklogApi;
use crate::error::{BacklogMcpError, Result};
use crate::links::{
    issue_comments_uri, issue_uri, project_issues_uri, project_uri, projects_uri, URI_SCHEME,
};
use crate::types::{Comment, Issue, Project};

/// The recognized resource path shapes.
///
/// `project` and `issue` ids are carried as strings: the tracker accepts
/// either a numeric id or a key for single-entity fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourcePath {
    /// `backlog:///projects`
    Projects,
    /// `backlog:///project/<id>`
    Project(String),
    /// `backlog:///project/<id>/issues`
    ProjectIssues(String),
    /// `backlog:///issue/<id>`
    Issue(String),
    /// `backlog:///issue/<id>/comments`
    IssueComments(String),
}

impl ResourcePath {
    /// Parse a URI into a path shape.
    ///
    /// Paths are matched literally and case-sensitively. A recognized
    /// first segment with a missing id is an invalid request; anything
    /// else unrecognized is not found.
    pub fn parse(uri: &str) -> Result<Self> {
        let prefix = format!("{URI_SCHEME}://");
        let rest = uri.strip_prefix(&prefix).ok_or_else(|| {
            BacklogMcpError::NotFound(format!("Unrecognized resource URI: {uri}"))
        })?;

        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["projects"] => Ok(Self::Projects),
            ["project"] => Err(BacklogMcpError::InvalidRequest(
                "project resource requires a project id or key".to_string(),
            )),
            ["project", id] => Ok(Self::Project((*id).to_string())),
            ["project", id, "issues"] => Ok(Self::ProjectIssues((*id).to_string())),
            ["issue"] => Err(BacklogMcpError::InvalidRequest(
                "issue resource requires an issue id".to_string(),
            )),
            ["issue", id] => Ok(Self::Issue((*id).to_string())),
            ["issue", id, "comments"] => Ok(Self::IssueComments((*id).to_string())),
            _ => Err(BacklogMcpError::NotFound(format!(
                "Unrecognized resource URI: {uri}"
            ))),
        }
    }
}

/// Maps resource URIs to backend fetches and JSON projections
#[derive(Clone)]
pub struct ResourceRouter {
    api: Arc<dyn BacklogApi>,
}

impl ResourceRouter {
    /// Create a router over the given backend
    pub fn new(api: Arc<dyn BacklogApi>) -> Self {
        Self { api }
    }

    /// Enumerate the readable resources.
    ///
    /// The `projects` pseudo-resource is always present; one descriptor
    /// per live project follows, with name and description fetched fresh.
    pub async fn list(&self) -> Result<Vec<Resource>> {
        let mut resources = vec![Annotated::new(
            RawResource {
                uri: projects_uri(),
                name: "All projects".to_string(),
                description: Some(
                    "Every project visible to the configured API key".to_string(),
                ),
                mime_type: Some("application/json".to_string()),
                size: None,
            },
            None,
        )];

        for project in self.api.list_projects().await? {
            resources.push(Annotated::new(
                RawResource {
                    uri: project_uri(project.id),
                    name: project.name.clone(),
                    description: project.description.clone(),
                    mime_type: Some("application/json".to_string()),
                    size: None,
                },
                None,
            ));
        }

        Ok(resources)
    }

    /// Read the resource addressed by `uri` and return its projection
    pub async fn read(&self, uri: &str) -> Result<Value> {
        match ResourcePath::parse(uri)? {
            ResourcePath::Projects => {
                let projects = self.api.list_projects().await?;
                Ok(Value::Array(projects.iter().map(project_view).collect()))
            }
            ResourcePath::Project(id) => {
                let project = self.api.get_project(&id).await?;
                Ok(project_view(&project))
            }
            ResourcePath::ProjectIssues(id) => {
                let issues = self.api.list_issues(Some(&id)).await?;
                Ok(Value::Array(issues.iter().map(issue_view).collect()))
            }
            ResourcePath::Issue(id) => {
                let issue = self.api.get_issue(&id).await?;
                Ok(issue_view(&issue))
            }
            ResourcePath::IssueComments(id) => {
                let issue_id: u64 = id.parse().map_err(|_| {
                    BacklogMcpError::InvalidRequest(format!("issue id must be numeric: {id}"))
                })?;
                let comments = self.api.list_comments(&id).await?;
                comments
                    .iter()
                    .map(|c| comment_view(issue_id, c))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array)
            }
        }
    }
}

fn project_view(project: &Project) -> Value {
    json!({
        "id": project.id,
        "key": project.project_key,
        "name": project.name,
        "description": project.description,
        "_links": {
            "self": project_uri(project.id),
            "issues": project_issues_uri(project.id),
        }
    })
}

fn issue_view(issue: &Issue) -> Value {
    json!({
        "id": issue.id,
        "issueKey": issue.issue_key,
        "summary": issue.summary,
        "status": issue.status,
        "_links": {
            "self": issue_uri(issue.id),
            "comments": issue_comments_uri(issue.id),
            "project": project_uri(issue.project_id),
        }
    })
}

// A comment has no URI of its own; its self link is the collection URI
// that re-fetches it.
fn comment_view(issue_id: u64, comment: &Comment) -> Result<Value> {
    let mut value = serde_json::to_value(comment)?;
    if let Value::Object(ref mut map) = value {
        map.insert(
            "_links".to_string(),
            json!({
                "self": issue_comments_uri(issue_id),
                "issue": issue_uri(issue_id),
            }),
        );
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{
        comment_fixture, issue_fixture, project_fixture, MockBacklogApi,
    };

    fn router(api: MockBacklogApi) -> ResourceRouter {
        ResourceRouter::new(Arc::new(api))
    }

    #[test]
    fn test_parse_recognized_paths() {
        assert_eq!(
            ResourcePath::parse("backlog:///projects").unwrap(),
            ResourcePath::Projects
        );
        assert_eq!(
            ResourcePath::parse("backlog:///project/5").unwrap(),
            ResourcePath::Project("5".to_string())
        );
        assert_eq!(
            ResourcePath::parse("backlog:///project/5/issues").unwrap(),
            ResourcePath::ProjectIssues("5".to_string())
        );
        assert_eq!(
            ResourcePath::parse("backlog:///issue/99/comments").unwrap(),
            ResourcePath::IssueComments("99".to_string())
        );
    }

    #[test]
    fn test_parse_missing_id_is_invalid_request() {
        assert!(matches!(
            ResourcePath::parse("backlog:///project"),
            Err(BacklogMcpError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_parse_unknown_segment_is_not_found() {
        assert!(matches!(
            ResourcePath::parse("backlog:///widget/5"),
            Err(BacklogMcpError::NotFound(_))
        ));
        assert!(matches!(
            ResourcePath::parse("notbacklog:///projects"),
            Err(BacklogMcpError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_read_projects_projection_and_self_links() {
        let api = MockBacklogApi::new().with_project(project_fixture(1, "DEV", "Dev", "d"));

        let value = router(api).read("backlog:///projects").await.unwrap();
        let projects = value.as_array().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0]["key"], "DEV");
        assert_eq!(projects[0]["_links"]["self"], "backlog:///project/1");
        assert_eq!(projects[0]["_links"]["issues"], "backlog:///project/1/issues");
    }

    #[tokio::test]
    async fn test_read_project_issues_projection() {
        let api = MockBacklogApi::new().with_issue(issue_fixture(99, 1, "DEV-99", "Bug"));

        let value = router(api).read("backlog:///project/1/issues").await.unwrap();
        let issues = value.as_array().unwrap();
        assert_eq!(issues[0]["issueKey"], "DEV-99");
        assert_eq!(issues[0]["status"]["name"], "Open");
        assert_eq!(issues[0]["_links"]["self"], "backlog:///issue/99");
        assert_eq!(issues[0]["_links"]["comments"], "backlog:///issue/99/comments");
        assert_eq!(issues[0]["_links"]["project"], "backlog:///project/1");
    }

    #[tokio::test]
    async fn test_read_issue_comments_carries_caller_issue_id() {
        let api = MockBacklogApi::new().with_comment(99, comment_fixture(500, "looks broken"));

        let value = router(api).read("backlog:///issue/99/comments").await.unwrap();
        let comments = value.as_array().unwrap();
        assert_eq!(comments[0]["content"], "looks broken");
        assert_eq!(comments[0]["_links"]["issue"], "backlog:///issue/99");
        assert_eq!(comments[0]["_links"]["self"], "backlog:///issue/99/comments");
    }

    #[tokio::test]
    async fn test_read_unknown_project_propagates_not_found() {
        let api = MockBacklogApi::new();
        let err = router(api).read("backlog:///project/42").await.unwrap_err();
        assert!(matches!(err, BacklogMcpError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_includes_pseudo_resource_and_live_projects() {
        let api = MockBacklogApi::new().with_project(project_fixture(1, "DEV", "Dev", "d"));

        let resources = router(api).list().await.unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].raw.uri, "backlog:///projects");
        assert_eq!(resources[1].raw.uri, "backlog:///project/1");
        assert_eq!(resources[1].raw.name, "Dev");
    }

    #[tokio::test]
    async fn test_list_surfaces_backend_failure() {
        let resources = router(MockBacklogApi::failing()).list().await;
        assert!(resources.is_err());
    }
}
