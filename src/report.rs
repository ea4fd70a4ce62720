//! Nightly failure reporting
//!
//! Maintains one tracking issue per failed nightly workflow run. The issue
//! title carries the run id, so re-running the reporter for the same run
//! finds the existing issue instead of filing a duplicate.

use crate::error::Result;
use crate::provider::Provider;
use crate::types::{Issue, Repository};
use chrono::Local;
use tracing::debug;

/// Label applied to every nightly failure tracking issue
pub const TRACKING_LABEL: &str = "CI";

/// Result of a failure report
#[derive(Debug, Clone)]
pub enum ReportOutcome {
    /// A new tracking issue was created
    Created(Issue),
    /// An issue for this run already exists; nothing was created
    AlreadyReported(Issue),
}

/// Title of the tracking issue for a workflow run
#[must_use]
pub fn issue_title(run_id: &str) -> String {
    format!("Nightly Run Failure: {run_id}")
}

/// Body of the tracking issue: the failure date plus a link to the run
fn issue_body(repository: &Repository, run_id: &str) -> String {
    let date = Local::now().format("%-d %b %Y");
    let url = format!("https://github.com/{repository}/actions/runs/{run_id}");
    format!("Nightly run failed on: {date}\n{url}")
}

/// Find or create the tracking issue for a failed nightly run (EFFECTFUL)
///
/// Searches by exact title first; an existing issue short-circuits the
/// creation, keeping the operation idempotent per run id.
pub async fn report_failure(provider: &dyn Provider, run_id: &str) -> Result<ReportOutcome> {
    let title = issue_title(run_id);

    if let Some(issue) = provider.find_issue_by_title(&title).await? {
        debug!(number = issue.number, run_id, "tracking issue already exists");
        return Ok(ReportOutcome::AlreadyReported(issue));
    }

    let body = issue_body(provider.repository(), run_id);
    let issue = provider
        .create_issue(&title, &body, &[TRACKING_LABEL.to_string()])
        .await?;

    debug!(number = issue.number, run_id, "created tracking issue");
    Ok(ReportOutcome::Created(issue))
}
