//! Merge evaluation - effectful orchestration
//!
//! Fetches the signals for one pull request and applies the precedence
//! rules. Only the final merge call mutates anything; every other provider
//! call is a read.

use crate::error::Result;
use crate::merge::rules;
use crate::provider::Provider;
use crate::types::Outcome;
use async_trait::async_trait;
use tracing::debug;

/// Evaluate one pull request and merge it when every gate passes (EFFECTFUL)
///
/// Fetch order is fixed: the pull request, its CI signals, then - only once
/// CI passes - reviews and collaborators. Provider failures propagate as
/// errors and are never translated into an outcome.
pub async fn decide(provider: &dyn Provider, pull_number: u64) -> Result<Outcome> {
    let pr = provider.get_pull_request(pull_number).await?;

    let statuses = provider.list_statuses(&pr.head_ref).await?;
    let check_runs = provider.list_check_runs(&pr.head_ref).await?;

    if let Some(outcome) = rules::evaluate_ci(&statuses, &check_runs) {
        debug!(pull_number, %outcome, "CI gates blocked the merge");
        return Ok(outcome);
    }

    let reviews = provider.list_reviews(pull_number).await?;
    let collaborators = provider.list_collaborators().await?;

    if let Some(outcome) = rules::evaluate_reviews(&reviews, &collaborators) {
        debug!(pull_number, %outcome, "review gates blocked the merge");
        return Ok(outcome);
    }

    provider.merge_pull_request(pull_number).await?;
    Ok(Outcome::Ok)
}

/// Strategy for evaluating one pull request by number
///
/// The dispatcher invokes the decision through this trait so tests can
/// substitute a recorder without performing network calls. This is the only
/// designed extension point.
#[async_trait]
pub trait MergeDecision: Send + Sync {
    /// Evaluate the pull request and return its outcome
    async fn decide(&self, pull_number: u64) -> Result<Outcome>;
}

/// Production decision strategy backed by a provider
pub struct MergeEngine<'a> {
    provider: &'a dyn Provider,
}

impl<'a> MergeEngine<'a> {
    /// Create an engine over `provider`
    pub const fn new(provider: &'a dyn Provider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl MergeDecision for MergeEngine<'_> {
    async fn decide(&self, pull_number: u64) -> Result<Outcome> {
        decide(self.provider, pull_number).await
    }
}
