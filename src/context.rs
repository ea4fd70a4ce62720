//! GitHub Actions workflow context
//!
//! Workflows hand the `github` context to nyx as a JSON-encoded string in the
//! `GITHUB_CONTEXT` environment variable. The payload's `event` field is
//! classified structurally into a closed set of known event shapes; everything
//! downstream switches over that sum type instead of probing raw JSON.

use crate::error::{Error, Result};
use crate::types::Repository;
use serde::Deserialize;
use tracing::debug;

/// Environment variable holding the JSON-encoded `github` context
pub const CONTEXT_VAR: &str = "GITHUB_CONTEXT";

/// The `github` context of a workflow run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubContext {
    /// `owner/name` of the repository the workflow ran in
    pub repository: String,
    /// Sequence number of the run within its workflow
    pub run_number: String,
    /// The webhook event that triggered the run
    pub event: WorkflowEvent,
}

/// A webhook event nyx knows how to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// A commit-status update
    Status(StatusEvent),
    /// A pull-request review submission
    PullRequestReview(PullRequestReviewEvent),
}

/// Payload of a `status` webhook event
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusEvent {
    /// Branches whose head matches the commit the status was reported for
    pub branches: Vec<Branch>,
}

/// A branch entry inside a status event
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Branch {
    /// Branch name
    pub name: String,
    /// Head commit of the branch
    pub commit: CommitRef,
    /// Whether the branch is protected
    #[serde(default)]
    pub protected: bool,
}

/// Commit reference inside a status-event branch entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommitRef {
    /// Commit SHA
    pub sha: String,
}

/// Payload of a `pull_request_review` webhook event
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestReviewEvent {
    /// What happened to the review (`submitted`, `edited`, `dismissed`)
    pub action: String,
    /// The pull request the review belongs to
    pub pull_request: PullRequestNumber,
}

/// The pull-request slice of a review event
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestNumber {
    /// PR number
    pub number: u64,
}

/// Raw envelope as serialized into `GITHUB_CONTEXT`
#[derive(Deserialize)]
struct Envelope {
    repository: String,
    #[serde(default)]
    run_number: String,
    event: serde_json::Value,
}

impl GitHubContext {
    /// Parse a JSON-encoded `github` context string
    ///
    /// Fails with [`Error::MalformedContext`] when `raw` is not valid JSON or
    /// is missing the envelope fields, and with [`Error::UnsupportedEvent`]
    /// when the `event` payload matches none of the known shapes.
    pub fn parse(raw: &str) -> Result<Self> {
        let envelope: Envelope =
            serde_json::from_str(raw).map_err(|e| Error::MalformedContext(e.to_string()))?;
        let event = classify_event(envelope.event)?;
        Ok(Self {
            repository: envelope.repository,
            run_number: envelope.run_number,
            event,
        })
    }

    /// Repository coordinates of the run, parsed from the `owner/name` field
    pub fn repository(&self) -> Result<Repository> {
        self.repository.parse()
    }
}

/// Classify a raw event payload by structural inspection
///
/// Checked in order of specificity: a `branches` field marks a status event;
/// otherwise `action` plus `pull_request` mark a review event.
fn classify_event(event: serde_json::Value) -> Result<WorkflowEvent> {
    if event.get("branches").is_some() {
        let status: StatusEvent = serde_json::from_value(event)
            .map_err(|e| Error::UnsupportedEvent(format!("malformed status event: {e}")))?;
        return Ok(WorkflowEvent::Status(status));
    }

    if event.get("action").is_some() && event.get("pull_request").is_some() {
        let review: PullRequestReviewEvent = serde_json::from_value(event).map_err(|e| {
            Error::UnsupportedEvent(format!("malformed pull_request_review event: {e}"))
        })?;
        return Ok(WorkflowEvent::PullRequestReview(review));
    }

    Err(Error::UnsupportedEvent(
        "no status or pull_request_review fields present".to_string(),
    ))
}

/// Read and parse the workflow context from the process environment
///
/// Returns `Ok(None)` when `GITHUB_CONTEXT` is unset, so callers can
/// distinguish "not running under a workflow" from a malformed payload.
pub fn read_context() -> Result<Option<GitHubContext>> {
    match std::env::var(CONTEXT_VAR) {
        Ok(raw) => {
            let context = GitHubContext::parse(&raw)?;
            debug!(repository = %context.repository, "parsed workflow context");
            Ok(Some(context))
        }
        Err(std::env::VarError::NotPresent) => {
            debug!("no {CONTEXT_VAR} in environment");
            Ok(None)
        }
        Err(std::env::VarError::NotUnicode(_)) => Err(Error::MalformedContext(
            "value is not valid unicode".to_string(),
        )),
    }
}
