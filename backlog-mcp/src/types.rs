//! Data-transfer shapes for the tracker's JSON payloads
//!
//! These are immutable snapshots of backend state, re-fetched on every
//! read. Field names follow the tracker's camelCase wire convention.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project as returned by `GET /projects` and `GET /projects/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Numeric project id
    pub id: u64,
    /// Short string key (e.g. `DEV`)
    pub project_key: String,
    /// Display name
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
}

/// Status of an issue, an id/name pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueStatus {
    /// Numeric status id
    pub id: u64,
    /// Status display name (e.g. `Open`)
    pub name: String,
}

/// An issue as returned by the issue endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Numeric issue id
    pub id: u64,
    /// Id of the owning project
    pub project_id: u64,
    /// Human-readable key (e.g. `DEV-42`)
    pub issue_key: String,
    /// One-line summary
    pub summary: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Current status
    pub status: IssueStatus,
}

/// The authoring user embedded in a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Numeric user id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Tracker role of the user
    #[serde(default)]
    pub role_type: Option<u8>,
}

/// A comment on an issue.
///
/// The parent issue id is not embedded in the payload; it is supplied by
/// caller context (the URI or tool argument that fetched the comment).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Numeric comment id
    pub id: u64,
    /// Comment body; the tracker emits `null` for change-only entries
    #[serde(default)]
    pub content: Option<String>,
    /// Authoring user
    pub created_user: User,
    /// Creation timestamp
    pub created: DateTime<Utc>,
    /// Last-update timestamp
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

/// Payload for `POST /issues`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    /// Target project id
    pub project_id: u64,
    /// One-line summary
    pub summary: String,
    /// Issue type id
    pub issue_type_id: u64,
    /// Priority id
    pub priority_id: u64,
    /// Optional free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for `POST /issues/{id}/comments`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    /// Comment body
    pub content: String,
}
