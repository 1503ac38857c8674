//! In-memory fixture implementation of [`BacklogApi`] for tests
//!
//! Deterministic by construction: fixtures are registered up front,
//! created entities take ids from a configurable seed, and timestamps are
//! pinned to the epoch. A `failing()` instance makes every operation
//! error, for exercising failure paths.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{BacklogMcpError, Result};
use crate::types::{Comment, Issue, IssueStatus, NewComment, NewIssue, Project, User};

use super::BacklogApi;

/// Fixture backend holding canned projects, issues and comments
#[derive(Debug, Default)]
pub struct MockBacklogApi {
    projects: Vec<Project>,
    issues: Vec<Issue>,
    comments: HashMap<String, Vec<Comment>>,
    next_issue_id: u64,
    next_comment_id: u64,
    failing: bool,
}

impl MockBacklogApi {
    /// Create an empty fixture backend
    pub fn new() -> Self {
        Self {
            next_issue_id: 99,
            next_comment_id: 500,
            ..Default::default()
        }
    }

    /// Create a backend on which every operation fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    /// Register a project fixture
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    /// Register an issue fixture
    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.push(issue);
        self
    }

    /// Register a comment fixture under the given issue id
    pub fn with_comment(mut self, issue_id: u64, comment: Comment) -> Self {
        self.comments
            .entry(issue_id.to_string())
            .or_default()
            .push(comment);
        self
    }

    /// Override the id assigned to the next created issue
    pub fn with_next_issue_id(mut self, id: u64) -> Self {
        self.next_issue_id = id;
        self
    }

    fn check_available(&self) -> Result<()> {
        if self.failing {
            return Err(BacklogMcpError::Other("backend unavailable".to_string()));
        }
        Ok(())
    }
}

/// Build a project fixture
pub fn project_fixture(id: u64, key: &str, name: &str, description: &str) -> Project {
    Project {
        id,
        project_key: key.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
    }
}

/// Build an open issue fixture
pub fn issue_fixture(id: u64, project_id: u64, key: &str, summary: &str) -> Issue {
    Issue {
        id,
        project_id,
        issue_key: key.to_string(),
        summary: summary.to_string(),
        description: None,
        status: IssueStatus {
            id: 1,
            name: "Open".to_string(),
        },
    }
}

/// Build a comment fixture
pub fn comment_fixture(id: u64, content: &str) -> Comment {
    Comment {
        id,
        content: Some(content.to_string()),
        created_user: User {
            id: 1,
            name: "Mock User".to_string(),
            role_type: Some(1),
        },
        created: DateTime::<Utc>::UNIX_EPOCH,
        updated: None,
    }
}

#[async_trait]
impl BacklogApi for MockBacklogApi {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.check_available()?;
        Ok(self.projects.clone())
    }

    async fn get_project(&self, project_id_or_key: &str) -> Result<Project> {
        self.check_available()?;
        self.projects
            .iter()
            .find(|p| p.id.to_string() == project_id_or_key || p.project_key == project_id_or_key)
            .cloned()
            .ok_or_else(|| BacklogMcpError::NotFound(format!("get project: {project_id_or_key}")))
    }

    async fn list_issues(&self, project_id: Option<&str>) -> Result<Vec<Issue>> {
        self.check_available()?;
        Ok(self
            .issues
            .iter()
            .filter(|i| project_id.map_or(true, |id| i.project_id.to_string() == id))
            .cloned()
            .collect())
    }

    async fn get_issue(&self, issue_id_or_key: &str) -> Result<Issue> {
        self.check_available()?;
        self.issues
            .iter()
            .find(|i| i.id.to_string() == issue_id_or_key || i.issue_key == issue_id_or_key)
            .cloned()
            .ok_or_else(|| BacklogMcpError::NotFound(format!("get issue: {issue_id_or_key}")))
    }

    async fn list_comments(&self, issue_id: &str) -> Result<Vec<Comment>> {
        self.check_available()?;
        Ok(self.comments.get(issue_id).cloned().unwrap_or_default())
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<Issue> {
        self.check_available()?;
        let key_prefix = self
            .projects
            .iter()
            .find(|p| p.id == issue.project_id)
            .map(|p| p.project_key.clone())
            .unwrap_or_else(|| "ISSUE".to_string());

        Ok(Issue {
            id: self.next_issue_id,
            project_id: issue.project_id,
            issue_key: format!("{}-{}", key_prefix, self.next_issue_id),
            summary: issue.summary.clone(),
            description: issue.description.clone(),
            status: IssueStatus {
                id: 1,
                name: "Open".to_string(),
            },
        })
    }

    async fn create_comment(&self, _issue_id: &str, comment: &NewComment) -> Result<Comment> {
        self.check_available()?;
        Ok(Comment {
            id: self.next_comment_id,
            content: Some(comment.content.clone()),
            created_user: User {
                id: 1,
                name: "Mock User".to_string(),
                role_type: Some(1),
            },
            created: DateTime::<Utc>::UNIX_EPOCH,
            updated: None,
        })
    }
}
