//! Prompt templates served over the protocol
//!
//! Two templates exist. `project_overview` is static instructional text
//! pointing the caller at the tool chain to run. `bug_triage` aggregates
//! live data before emitting its messages: it scans every project's
//! issues for a fixed keyword and embeds each match as a resource
//! reference, so the caller starts its analysis with the evidence
//! already in hand.

use std::sync::Arc;

use futures_util::stream::{self, StreamExt, TryStreamExt};
use rmcp::model::{
    AnnotateAble, GetPromptResult, Prompt, PromptMessage, PromptMessageContent, PromptMessageRole,
    RawEmbeddedResource, ResourceContents,
};

use crate::backend::BacklogApi;
use crate::error::{BacklogMcpError, Result};
use crate::links::issue_uri;
use crate::types::Issue;

/// Name of the static walkthrough prompt
pub const PROJECT_OVERVIEW: &str = "project_overview";

/// Name of the keyword-aggregation prompt
pub const BUG_TRIAGE: &str = "bug_triage";

/// Keyword the triage prompt scans summaries and descriptions for
const BUG_KEYWORD: &str = "bug";

/// Upper bound on concurrent per-project issue fetches during
/// aggregation. The tracker is scanned one suspension per project; the
/// bound keeps a space with many projects from opening that many
/// connections at once.
const MAX_CONCURRENT_PROJECT_FETCHES: usize = 4;

const OVERVIEW_TEXT: &str = "You are reviewing a Backlog space. Start by calling the \
`list_projects` tool to enumerate projects. For each project of interest, call \
`get_project_issues` with its numeric id to see open work, then `get_issue_details` \
and `get_issue_comments` to drill into individual issues. Every result embeds a \
`_links.tools` map naming the next call and its arguments, so chain from those \
instead of re-deriving ids. Summarize each project's state in a short paragraph.";

const ANALYSIS_TEXT: &str = "Analyze the issues above. For each one, judge severity from \
its summary and status, call `get_issue_comments` with its id if you need discussion \
context, and finish with a prioritized triage list: which issues to fix first and why.";

/// Static registry of prompt templates plus their backing aggregations
#[derive(Clone)]
pub struct PromptLibrary {
    api: Arc<dyn BacklogApi>,
}

impl PromptLibrary {
    /// Create a library over the given backend
    pub fn new(api: Arc<dyn BacklogApi>) -> Self {
        Self { api }
    }

    /// List the available prompt descriptors. Static; identical on every
    /// call.
    pub fn list(&self) -> Vec<Prompt> {
        vec![
            Prompt {
                name: PROJECT_OVERVIEW.to_string(),
                description: Some(
                    "Walk through every project in the space using the project and issue tools"
                        .to_string(),
                ),
                arguments: None,
            },
            Prompt {
                name: BUG_TRIAGE.to_string(),
                description: Some(format!(
                    "Collect every issue mentioning \"{BUG_KEYWORD}\" across all projects and \
                     triage them"
                )),
                arguments: None,
            },
        ]
    }

    /// Produce the message sequence for the named prompt
    pub async fn get(&self, name: &str) -> Result<GetPromptResult> {
        match name {
            PROJECT_OVERVIEW => Ok(GetPromptResult {
                description: Some("Project-by-project walkthrough".to_string()),
                messages: vec![text_message(OVERVIEW_TEXT.to_string())],
            }),
            BUG_TRIAGE => self.bug_triage().await,
            _ => Err(BacklogMcpError::NotFound(format!(
                "Prompt not found: {name}"
            ))),
        }
    }

    /// Fetch all projects, fan out one issue fetch per project, and keep
    /// the issues mentioning the triage keyword.
    ///
    /// The join is fail-fast: any fetch failure fails the whole
    /// aggregation, never a partial result. Match order is fetch
    /// resolution order and must not be relied upon.
    async fn bug_triage(&self) -> Result<GetPromptResult> {
        let projects = self.api.list_projects().await?;
        tracing::debug!("scanning {} projects for \"{}\"", projects.len(), BUG_KEYWORD);

        let per_project: Vec<Vec<Issue>> = stream::iter(projects.into_iter().map(|project| {
            let api = Arc::clone(&self.api);
            async move { api.list_issues(Some(&project.id.to_string())).await }
        }))
        .buffer_unordered(MAX_CONCURRENT_PROJECT_FETCHES)
        .try_collect()
        .await?;

        let matches: Vec<Issue> = per_project
            .into_iter()
            .flatten()
            .filter(mentions_keyword)
            .collect();

        let mut messages = Vec::with_capacity(matches.len() + 2);
        messages.push(text_message(format!(
            "Found {} issue(s) mentioning \"{}\" across all projects:",
            matches.len(),
            BUG_KEYWORD
        )));
        for issue in &matches {
            messages.push(PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::Resource {
                    resource: RawEmbeddedResource {
                        resource: ResourceContents::TextResourceContents {
                            uri: issue_uri(issue.id),
                            mime_type: Some("application/json".to_string()),
                            text: serde_json::to_string_pretty(issue)?,
                        },
                    }
                    .no_annotation(),
                },
            });
        }
        messages.push(text_message(ANALYSIS_TEXT.to_string()));

        Ok(GetPromptResult {
            description: Some(format!("Triage of issues mentioning \"{BUG_KEYWORD}\"")),
            messages,
        })
    }
}

fn mentions_keyword(issue: &Issue) -> bool {
    let in_summary = issue.summary.to_lowercase().contains(BUG_KEYWORD);
    let in_description = issue
        .description
        .as_deref()
        .map(|d| d.to_lowercase().contains(BUG_KEYWORD))
        .unwrap_or(false);
    in_summary || in_description
}

fn text_message(text: String) -> PromptMessage {
    PromptMessage {
        role: PromptMessageRole::User,
        content: PromptMessageContent::Text { text },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{issue_fixture, project_fixture, MockBacklogApi};

    fn library(api: MockBacklogApi) -> PromptLibrary {
        PromptLibrary::new(Arc::new(api))
    }

    #[test]
    fn test_list_is_static_across_calls() {
        let library = library(MockBacklogApi::new());
        let first = serde_json::to_value(library.list()).unwrap();
        let second = serde_json::to_value(library.list()).unwrap();
        assert_eq!(first, second);

        let names: Vec<_> = library.list().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec![PROJECT_OVERVIEW, BUG_TRIAGE]);
    }

    #[tokio::test]
    async fn test_unknown_prompt_is_not_found() {
        let err = library(MockBacklogApi::new()).get("nonexistent").await.unwrap_err();
        assert!(matches!(err, BacklogMcpError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_overview_is_instructional_text() {
        let result = library(MockBacklogApi::new()).get(PROJECT_OVERVIEW).await.unwrap();
        assert_eq!(result.messages.len(), 1);
        match &result.messages[0].content {
            PromptMessageContent::Text { text } => assert!(text.contains("list_projects")),
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bug_triage_filters_case_insensitively() {
        let mut description_match = issue_fixture(11, 2, "OPS-11", "Deploy fails");
        description_match.description = Some("Probably a BUG in the pipeline".to_string());

        let api = MockBacklogApi::new()
            .with_project(project_fixture(1, "DEV", "Dev", "d"))
            .with_project(project_fixture(2, "OPS", "Ops", "o"))
            .with_issue(issue_fixture(10, 1, "DEV-10", "Bug in login form"))
            .with_issue(description_match)
            .with_issue(issue_fixture(12, 1, "DEV-12", "Add dark mode"));

        let result = library(api).get(BUG_TRIAGE).await.unwrap();

        // leading text + one resource per match + trailing instruction
        assert_eq!(result.messages.len(), 4);

        let mut uris: Vec<String> = result.messages[1..3]
            .iter()
            .map(|m| match &m.content {
                PromptMessageContent::Resource {
                    resource:
                        rmcp::model::Annotated {
                            raw:
                                RawEmbeddedResource {
                                    resource: ResourceContents::TextResourceContents { uri, .. },
                                },
                            ..
                        },
                } => uri.clone(),
                other => panic!("expected embedded resource, got {other:?}"),
            })
            .collect();
        uris.sort();
        assert_eq!(uris, vec!["backlog:///issue/10", "backlog:///issue/11"]);

        match &result.messages[3].content {
            PromptMessageContent::Text { text } => assert!(text.contains("triage")),
            other => panic!("expected closing instruction, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bug_triage_has_no_partial_results_on_failure() {
        let api = MockBacklogApi::failing();
        assert!(library(api).get(BUG_TRIAGE).await.is_err());
    }
}
