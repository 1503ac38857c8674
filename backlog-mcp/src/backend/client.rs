//! reqwest implementation of [`BacklogApi`]
//!
//! Thin pass-through over the tracker's REST endpoints: the API key is
//! attached as a query credential on every call, state-changing calls
//! send form-encoded bodies, and each operation performs a single network
//! attempt — no retries, no caching, no timeout override.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::{BacklogMcpError, Result};
use crate::types::{Comment, Issue, NewComment, NewIssue, Project};

use super::BacklogApi;

/// HTTP client for the issue-tracker API
#[derive(Debug, Clone)]
pub struct BacklogClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl BacklogClient {
    /// Create a client from connection settings
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config.base_url(), config.api_key.clone())
    }

    /// Create a client against an explicit base URL.
    ///
    /// Used by tests to point the client at a local mock server.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        operation: &'static str,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {} ({})", path, operation);

        let response = self
            .http
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        Self::decode(response, operation).await
    }

    async fn post_form<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        operation: &'static str,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {} ({})", path, operation);

        let response = self
            .http
            .post(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .form(body)
            .send()
            .await?;

        Self::decode(response, operation).await
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("{} failed with {}: {}", operation, status, body);
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(BacklogMcpError::NotFound(format!("{operation}: {body}")));
            }
            return Err(BacklogMcpError::Api {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl BacklogApi for BacklogClient {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.get_json("/projects", &[], "list projects").await
    }

    async fn get_project(&self, project_id_or_key: &str) -> Result<Project> {
        self.get_json(
            &format!("/projects/{project_id_or_key}"),
            &[],
            "get project",
        )
        .await
    }

    async fn list_issues(&self, project_id: Option<&str>) -> Result<Vec<Issue>> {
        match project_id {
            // Array-shaped filter key, even for a single value
            Some(id) => {
                self.get_json("/issues", &[("projectId[]", id)], "list issues")
                    .await
            }
            None => self.get_json("/issues", &[], "list issues").await,
        }
    }

    async fn get_issue(&self, issue_id_or_key: &str) -> Result<Issue> {
        self.get_json(&format!("/issues/{issue_id_or_key}"), &[], "get issue")
            .await
    }

    async fn list_comments(&self, issue_id: &str) -> Result<Vec<Comment>> {
        self.get_json(
            &format!("/issues/{issue_id}/comments"),
            &[],
            "list comments",
        )
        .await
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<Issue> {
        self.post_form("/issues", issue, "create issue").await
    }

    async fn create_comment(&self, issue_id: &str, comment: &NewComment) -> Result<Comment> {
        self.post_form(
            &format!("/issues/{issue_id}/comments"),
            comment,
            "create comment",
        )
        .await
    }
}
