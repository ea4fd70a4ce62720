//! Core types for nyx

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Repository coordinates (owner + name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl FromStr for Repository {
    type Err = Error;

    /// Parse an `owner/name` string, e.g. `malleatus/nyx-example`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(Error::MalformedRepository(s.to_string())),
        }
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
    /// Web URL for the PR
    pub html_url: String,
}

// =============================================================================
// CI signals
// =============================================================================

/// State of a commit status (legacy Status API)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    /// The status reported success
    Success,
    /// The status has not finished yet
    Pending,
    /// The status reported failure
    Failure,
    /// The status reporter hit an error
    Error,
    /// A state outside the documented vocabulary
    #[serde(other)]
    Unrecognized,
}

/// A commit status attached to a head ref
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitStatus {
    /// Reported state
    pub state: StatusState,
}

/// Progress of a check run (Checks API)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// Queued but not started
    Queued,
    /// Currently running
    InProgress,
    /// Finished; a conclusion is available
    Completed,
    /// A status outside the documented vocabulary
    #[serde(other)]
    Unrecognized,
}

/// Result of a completed check run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    /// The run passed
    Success,
    /// The run failed
    Failure,
    /// The run finished with a neutral result
    Neutral,
    /// The run was cancelled
    Cancelled,
    /// The run exceeded its time limit
    TimedOut,
    /// The run needs action before it can finish
    ActionRequired,
    /// The run was skipped
    Skipped,
    /// A conclusion outside the documented vocabulary
    #[serde(other)]
    Unrecognized,
}

/// A check run attached to a head ref
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRun {
    /// Progress of the run
    pub status: CheckStatus,
    /// Result, present once `status` is `Completed`
    pub conclusion: Option<CheckConclusion>,
}

// =============================================================================
// Review signals
// =============================================================================

/// State of a pull-request review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    /// The reviewer approved the changes
    Approved,
    /// The reviewer requested changes
    ChangesRequested,
    /// The reviewer commented without a verdict
    Commented,
    /// The review was dismissed
    Dismissed,
    /// The review has not been submitted yet
    Pending,
    /// A state outside the documented vocabulary
    #[serde(other)]
    Unrecognized,
}

/// A pull-request review
///
/// A reviewer may appear multiple times (one entry per submitted review).
/// The list is evaluated as-is, never collapsed to a latest-per-author view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Login of the review author
    pub author: String,
    /// Review state
    pub state: ReviewState,
}

/// A repository collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaborator {
    /// Account login
    pub login: String,
}

// =============================================================================
// Outcomes
// =============================================================================

/// Terminal result of a merge evaluation
///
/// The discriminants double as the process exit status and are part of the
/// external interface: never renumber them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every gate passed and the merge was issued
    Ok = 0,
    /// No commit statuses and no check runs exist for the head ref
    NoStatuses = 80,
    /// A commit status reported failure
    StatusRed = 81,
    /// A commit status is still pending
    StatusPending = 82,
    /// A completed check run concluded with something other than success
    ChecksRed = 83,
    /// A check run has not completed yet
    ChecksPending = 84,
    /// No collaborator has approved
    NoApprovals = 90,
    /// A collaborator requested changes
    Rejected = 91,
    /// A commit status carried an unrecognized state
    Unknown = 99,
    /// The event did not resolve to an evaluable pull request
    DidNotRun = 100,
}

impl Outcome {
    /// Numeric code, used verbatim as the process exit status
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ok => "ok",
            Self::NoStatuses => "no-statuses",
            Self::StatusRed => "status-red",
            Self::StatusPending => "status-pending",
            Self::ChecksRed => "checks-red",
            Self::ChecksPending => "checks-pending",
            Self::NoApprovals => "no-approvals",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
            Self::DidNotRun => "did-not-run",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// Issues
// =============================================================================

/// A tracking issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number
    pub number: u64,
    /// Web URL for the issue
    pub html_url: String,
}
