//! URI builders and `_links` record shapes
//!
//! Every response the server produces carries a `_links` bundle: either a
//! sub-resource URI (resource reads) or a callable "next action" record
//! (tool results). The suggestion records replace conventional hyperlinks
//! with something a driving agent can invoke directly, so it never has to
//! re-derive ids. Two record shapes exist:
//!
//! - `{"tool": <name>, "arguments": {...}}` — concrete, ready to call
//! - `{"tool": <name>, "template": {...}}` — fill-in-the-blank; string
//!   blanks are `""`, numeric blanks are `null`

use serde_json::{json, Value};

/// URI scheme the resource surface is addressed under
pub const URI_SCHEME: &str = "backlog";

/// URI of the all-projects collection
pub fn projects_uri() -> String {
    format!("{URI_SCHEME}:///projects")
}

/// URI re-fetching a single project
pub fn project_uri(project_id: u64) -> String {
    format!("{URI_SCHEME}:///project/{project_id}")
}

/// URI of a project's issue collection
pub fn project_issues_uri(project_id: u64) -> String {
    format!("{URI_SCHEME}:///project/{project_id}/issues")
}

/// URI re-fetching a single issue
pub fn issue_uri(issue_id: u64) -> String {
    format!("{URI_SCHEME}:///issue/{issue_id}")
}

/// URI of an issue's comment collection
pub fn issue_comments_uri(issue_id: u64) -> String {
    format!("{URI_SCHEME}:///issue/{issue_id}/comments")
}

/// A suggestion with concrete, pre-filled arguments
pub fn tool_call(name: &str, arguments: Value) -> Value {
    json!({ "tool": name, "arguments": arguments })
}

/// A suggestion whose arguments the caller fills in
pub fn tool_template(name: &str, template: Value) -> Value {
    json!({ "tool": name, "template": template })
}
