//! Outbound client for the issue-tracker REST API
//!
//! The [`BacklogApi`] trait is the seam between protocol handlers and the
//! network: handlers depend on the trait, production wires in the reqwest
//! [`BacklogClient`], tests wire in [`MockBacklogApi`].

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Comment, Issue, NewComment, NewIssue, Project};

pub mod client;
pub mod mock;

pub use client::BacklogClient;
pub use mock::MockBacklogApi;

/// Typed operations over the tracker's REST surface.
///
/// One method per backend capability; parameters are already validated by
/// the caller and every method performs exactly one network attempt.
#[async_trait]
pub trait BacklogApi: Send + Sync {
    /// `GET /projects`
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// `GET /projects/{projectIdOrKey}`
    async fn get_project(&self, project_id_or_key: &str) -> Result<Project>;

    /// `GET /issues`, optionally filtered by project.
    ///
    /// The filter is encoded as the array-shaped `projectId[]` query key
    /// even for a single value; the tracker's list endpoint rejects the
    /// scalar form.
    async fn list_issues(&self, project_id: Option<&str>) -> Result<Vec<Issue>>;

    /// `GET /issues/{issueIdOrKey}`
    async fn get_issue(&self, issue_id_or_key: &str) -> Result<Issue>;

    /// `GET /issues/{issueIdOrKey}/comments`
    async fn list_comments(&self, issue_id: &str) -> Result<Vec<Comment>>;

    /// `POST /issues`
    async fn create_issue(&self, issue: &NewIssue) -> Result<Issue>;

    /// `POST /issues/{issueIdOrKey}/comments`
    async fn create_comment(&self, issue_id: &str, comment: &NewComment) -> Result<Comment>;
}
