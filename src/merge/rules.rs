//! Precedence rules - pure functions for the merge decision
//!
//! This module contains the pure, testable core of the decision engine.
//! No I/O happens here - all signals are passed in, and the first matching
//! rule wins.

use crate::types::{
    CheckConclusion, CheckRun, CheckStatus, Collaborator, CommitStatus, Outcome, Review,
    ReviewState, StatusState,
};

/// Evaluate the CI gates over commit statuses and check runs (PURE)
///
/// Returns the blocking outcome, or `None` when every CI gate passes and the
/// review gates should be consulted next. Rules in precedence order:
/// 1. `StatusRed` - any status reported failure
/// 2. `StatusPending` - any status still pending
/// 3. `Unknown` - any status outside the known vocabulary
/// 4. `NoStatuses` - no statuses and no check runs exist at all
/// 5. `ChecksPending` - any check run has not completed
/// 6. `ChecksRed` - any completed check run concluded with anything but success
///
/// A red signal outranks a pending one for statuses, so a failing PR is
/// reported as red even while other statuses are still running.
#[must_use]
pub fn evaluate_ci(statuses: &[CommitStatus], check_runs: &[CheckRun]) -> Option<Outcome> {
    if statuses.iter().any(|s| s.state == StatusState::Failure) {
        return Some(Outcome::StatusRed);
    }

    if statuses.iter().any(|s| s.state == StatusState::Pending) {
        return Some(Outcome::StatusPending);
    }

    if statuses.iter().any(|s| s.state != StatusState::Success) {
        // None are failure and none are pending; either there is a new kind
        // of status or a reporter errored out.
        return Some(Outcome::Unknown);
    }

    if statuses.is_empty() && check_runs.is_empty() {
        return Some(Outcome::NoStatuses);
    }

    if check_runs
        .iter()
        .any(|c| c.status != CheckStatus::Completed)
    {
        return Some(Outcome::ChecksPending);
    }

    if check_runs.iter().any(|c| {
        c.status == CheckStatus::Completed && c.conclusion != Some(CheckConclusion::Success)
    }) {
        return Some(Outcome::ChecksRed);
    }

    None
}

/// Keep only reviews authored by a collaborator (PURE)
///
/// Reviews from accounts outside the collaborator list never affect the
/// outcome.
#[must_use]
pub fn filter_reviews_by_collaborators<'a>(
    reviews: &'a [Review],
    collaborators: &[Collaborator],
) -> Vec<&'a Review> {
    reviews
        .iter()
        .filter(|review| collaborators.iter().any(|c| c.login == review.author))
        .collect()
}

/// Evaluate the review gates (PURE)
///
/// Returns the blocking outcome, or `None` when the pull request may merge.
/// Rules in precedence order:
/// 1. `NoApprovals` - no collaborator reviews, or no approval among them
/// 2. `Rejected` - a collaborator requested changes
///
/// A rejection is sticky: one `CHANGES_REQUESTED` review blocks the merge
/// even when approvals coexist, because the raw review list is evaluated
/// rather than each reviewer's latest verdict.
#[must_use]
pub fn evaluate_reviews(reviews: &[Review], collaborators: &[Collaborator]) -> Option<Outcome> {
    let collaborator_reviews = filter_reviews_by_collaborators(reviews, collaborators);

    if !collaborator_reviews
        .iter()
        .any(|r| r.state == ReviewState::Approved)
    {
        return Some(Outcome::NoApprovals);
    }

    if collaborator_reviews
        .iter()
        .any(|r| r.state == ReviewState::ChangesRequested)
    {
        return Some(Outcome::Rejected);
    }

    None
}
