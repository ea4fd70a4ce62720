//! Repository provider for GitHub
//!
//! Provides the external-collaborator interface the decision engine and the
//! failure reporter talk to, so tests can substitute a mock without network
//! access.

mod github;

pub use github::GitHubProvider;

use crate::error::Result;
use crate::types::{
    CheckRun, Collaborator, CommitStatus, Issue, PullRequest, Repository, Review,
};
use async_trait::async_trait;

/// Provider trait for the repository operations nyx performs
///
/// Implementations are scoped to a single repository; every call is an
/// independent one-shot request with no caching between them.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Fetch a pull request by number
    async fn get_pull_request(&self, number: u64) -> Result<PullRequest>;

    /// List the commit statuses reported for a head ref (legacy Status API)
    ///
    /// Returns the raw status list, which may contain several entries per
    /// context (one per delivery), not the combined rollup.
    async fn list_statuses(&self, ref_name: &str) -> Result<Vec<CommitStatus>>;

    /// List the check runs for a head ref (Checks API)
    async fn list_check_runs(&self, ref_name: &str) -> Result<Vec<CheckRun>>;

    /// List the reviews submitted on a pull request
    ///
    /// Entries without a resolvable author account are dropped.
    async fn list_reviews(&self, number: u64) -> Result<Vec<Review>>;

    /// List the collaborators of the repository
    async fn list_collaborators(&self) -> Result<Vec<Collaborator>>;

    /// Find the first open pull request whose head is `owner:branch`
    async fn find_open_pull_by_head(&self, branch: &str) -> Result<Option<PullRequest>>;

    /// Merge a pull request using the repository's default merge method
    async fn merge_pull_request(&self, number: u64) -> Result<()>;

    /// Find a `CI`-labeled issue carrying `title` in its title
    async fn find_issue_by_title(&self, title: &str) -> Result<Option<Issue>>;

    /// Create an issue
    async fn create_issue(&self, title: &str, body: &str, labels: &[String]) -> Result<Issue>;

    /// The repository this provider is scoped to
    fn repository(&self) -> &Repository;
}
