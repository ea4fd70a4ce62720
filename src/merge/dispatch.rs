//! Context dispatch - from workflow event to merge evaluation
//!
//! Resolves which pull request a workflow event is about, then hands the
//! number to the decision strategy. Status events name a commit, so the
//! commit's branch has to be correlated to an open pull request first;
//! review events carry the number directly.

use crate::context::{GitHubContext, WorkflowEvent};
use crate::error::Result;
use crate::merge::engine::{MergeDecision, MergeEngine};
use crate::provider::{GitHubProvider, Provider};
use crate::types::Outcome;
use tracing::debug;

/// Dispatch a workflow event to the decision strategy
///
/// Returns `DidNotRun` when a status event cannot be correlated to an open
/// pull request; the decision strategy is not invoked in that case.
pub async fn dispatch(
    context: &GitHubContext,
    provider: &dyn Provider,
    decision: &dyn MergeDecision,
) -> Result<Outcome> {
    match &context.event {
        WorkflowEvent::Status(event) => {
            // A commit that belongs to no branch has nothing to evaluate.
            let Some(branch) = event.branches.first() else {
                debug!("status event carries no branches");
                return Ok(Outcome::DidNotRun);
            };

            // Only the first branch is considered when a commit lands on
            // several; multi-branch commits are a known-unhandled case.
            let Some(pr) = provider.find_open_pull_by_head(&branch.name).await? else {
                debug!(branch = %branch.name, "no open pull request for branch");
                return Ok(Outcome::DidNotRun);
            };

            decision.decide(pr.number).await
        }
        WorkflowEvent::PullRequestReview(event) => decision.decide(event.pull_request.number).await,
    }
}

/// Evaluate the pull request targeted by a workflow context (EFFECTFUL)
///
/// Production wrapper around [`dispatch`]: resolves repository coordinates,
/// builds the GitHub provider, and wires in the real engine.
pub async fn merge_by_context(
    context: &GitHubContext,
    token: &str,
    host: Option<String>,
) -> Result<Outcome> {
    let repository = context.repository()?;
    debug!(repository = %repository, "dispatching from workflow context");

    let provider = GitHubProvider::new(token, repository, host)?;
    let engine = MergeEngine::new(&provider);
    dispatch(context, &provider, &engine).await
}
