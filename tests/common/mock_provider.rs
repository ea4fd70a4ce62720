//! Mock repository provider for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use nyx::error::{Error, Result};
use nyx::merge::MergeDecision;
use nyx::provider::Provider;
use nyx::types::{
    CheckRun, Collaborator, CommitStatus, Issue, Outcome, PullRequest, Repository, Review,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_issue`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIssueCall {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

/// Simple mock provider for testing
///
/// This manually implements `Provider` rather than using mockall, because
/// mockall has issues with methods returning references.
///
/// Features:
/// - Configurable responses per ref / pull number
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockProvider {
    repository: Repository,
    next_issue_number: AtomicU64,
    // Response maps
    pull_responses: Mutex<HashMap<u64, PullRequest>>,
    status_responses: Mutex<HashMap<String, Vec<CommitStatus>>>,
    check_run_responses: Mutex<HashMap<String, Vec<CheckRun>>>,
    review_responses: Mutex<HashMap<u64, Vec<Review>>>,
    collaborator_response: Mutex<Vec<Collaborator>>,
    find_pull_responses: Mutex<HashMap<String, Option<PullRequest>>>,
    issue_responses: Mutex<HashMap<String, Issue>>,
    // Call tracking
    get_pull_calls: Mutex<Vec<u64>>,
    list_status_calls: Mutex<Vec<String>>,
    list_check_run_calls: Mutex<Vec<String>>,
    list_review_calls: Mutex<Vec<u64>>,
    find_pull_calls: Mutex<Vec<String>>,
    merge_calls: Mutex<Vec<u64>>,
    find_issue_calls: Mutex<Vec<String>>,
    create_issue_calls: Mutex<Vec<CreateIssueCall>>,
    // Error injection
    error_on_get_pull: Mutex<Option<String>>,
    error_on_list_statuses: Mutex<Option<String>>,
    error_on_merge: Mutex<Option<String>>,
    error_on_create_issue: Mutex<Option<String>>,
}

impl MockProvider {
    /// Create a new mock scoped to the `malleatus/nyx-example` repository
    pub fn new() -> Self {
        Self::for_repository(Repository {
            owner: "malleatus".to_string(),
            name: "nyx-example".to_string(),
        })
    }

    /// Create a new mock scoped to a specific repository
    pub fn for_repository(repository: Repository) -> Self {
        Self {
            repository,
            next_issue_number: AtomicU64::new(1),
            pull_responses: Mutex::new(HashMap::new()),
            status_responses: Mutex::new(HashMap::new()),
            check_run_responses: Mutex::new(HashMap::new()),
            review_responses: Mutex::new(HashMap::new()),
            collaborator_response: Mutex::new(Vec::new()),
            find_pull_responses: Mutex::new(HashMap::new()),
            issue_responses: Mutex::new(HashMap::new()),
            get_pull_calls: Mutex::new(Vec::new()),
            list_status_calls: Mutex::new(Vec::new()),
            list_check_run_calls: Mutex::new(Vec::new()),
            list_review_calls: Mutex::new(Vec::new()),
            find_pull_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
            find_issue_calls: Mutex::new(Vec::new()),
            create_issue_calls: Mutex::new(Vec::new()),
            error_on_get_pull: Mutex::new(None),
            error_on_list_statuses: Mutex::new(None),
            error_on_merge: Mutex::new(None),
            error_on_create_issue: Mutex::new(None),
        }
    }

    // === Error injection methods ===

    /// Make `get_pull_request` return an error
    pub fn fail_get_pull_request(&self, msg: &str) {
        *self.error_on_get_pull.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_statuses` return an error
    pub fn fail_list_statuses(&self, msg: &str) {
        *self.error_on_list_statuses.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pull_request` return an error
    pub fn fail_merge(&self, msg: &str) {
        *self.error_on_merge.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_issue` return an error
    pub fn fail_create_issue(&self, msg: &str) {
        *self.error_on_create_issue.lock().unwrap() = Some(msg.to_string());
    }

    // === Response configuration ===

    /// Set the response for `get_pull_request` for a specific pull number
    pub fn set_pull_response(&self, number: u64, pull: PullRequest) {
        self.pull_responses.lock().unwrap().insert(number, pull);
    }

    /// Set the response for `list_statuses` for a specific ref
    pub fn set_status_response(&self, ref_name: &str, statuses: Vec<CommitStatus>) {
        self.status_responses
            .lock()
            .unwrap()
            .insert(ref_name.to_string(), statuses);
    }

    /// Set the response for `list_check_runs` for a specific ref
    pub fn set_check_run_response(&self, ref_name: &str, runs: Vec<CheckRun>) {
        self.check_run_responses
            .lock()
            .unwrap()
            .insert(ref_name.to_string(), runs);
    }

    /// Set the response for `list_reviews` for a specific pull number
    pub fn set_review_response(&self, number: u64, reviews: Vec<Review>) {
        self.review_responses.lock().unwrap().insert(number, reviews);
    }

    /// Set the response for `list_collaborators`
    pub fn set_collaborators(&self, collaborators: Vec<Collaborator>) {
        *self.collaborator_response.lock().unwrap() = collaborators;
    }

    /// Set the response for `find_open_pull_by_head` for a specific branch
    pub fn set_find_pull_response(&self, branch: &str, pull: Option<PullRequest>) {
        self.find_pull_responses
            .lock()
            .unwrap()
            .insert(branch.to_string(), pull);
    }

    /// Set the response for `find_issue_by_title` for a specific title
    pub fn set_issue_response(&self, title: &str, issue: Issue) {
        self.issue_responses
            .lock()
            .unwrap()
            .insert(title.to_string(), issue);
    }

    /// Helper to set up a pull request that passes every gate: one successful
    /// status, no check runs, and an approving review from a collaborator
    pub fn setup_approved_pull(&self, number: u64, branch: &str, reviewer: &str) {
        use nyx::types::{ReviewState, StatusState};

        self.set_pull_response(
            number,
            PullRequest {
                number,
                head_ref: branch.to_string(),
                title: format!("Test PR {number}"),
                html_url: format!("https://github.com/malleatus/nyx-example/pull/{number}"),
            },
        );
        self.set_status_response(
            branch,
            vec![CommitStatus {
                state: StatusState::Success,
            }],
        );
        self.set_check_run_response(branch, vec![]);
        self.set_review_response(
            number,
            vec![Review {
                author: reviewer.to_string(),
                state: ReviewState::Approved,
            }],
        );
        self.set_collaborators(vec![Collaborator {
            login: reviewer.to_string(),
        }]);
    }

    // === Call verification methods ===

    /// Get all pull numbers that `get_pull_request` was called with
    pub fn get_pull_request_calls(&self) -> Vec<u64> {
        self.get_pull_calls.lock().unwrap().clone()
    }

    /// Get all refs that `list_statuses` was called with
    pub fn get_list_status_calls(&self) -> Vec<String> {
        self.list_status_calls.lock().unwrap().clone()
    }

    /// Get all refs that `list_check_runs` was called with
    pub fn get_list_check_run_calls(&self) -> Vec<String> {
        self.list_check_run_calls.lock().unwrap().clone()
    }

    /// Get all pull numbers that `list_reviews` was called with
    pub fn get_list_review_calls(&self) -> Vec<u64> {
        self.list_review_calls.lock().unwrap().clone()
    }

    /// Get all branches that `find_open_pull_by_head` was called with
    pub fn get_find_pull_calls(&self) -> Vec<String> {
        self.find_pull_calls.lock().unwrap().clone()
    }

    /// Get all pull numbers that `merge_pull_request` was called with
    pub fn get_merge_calls(&self) -> Vec<u64> {
        self.merge_calls.lock().unwrap().clone()
    }

    /// Get all titles that `find_issue_by_title` was called with
    pub fn get_find_issue_calls(&self) -> Vec<String> {
        self.find_issue_calls.lock().unwrap().clone()
    }

    /// Get all `create_issue` calls
    pub fn get_create_issue_calls(&self) -> Vec<CreateIssueCall> {
        self.create_issue_calls.lock().unwrap().clone()
    }

    /// Assert that `merge_pull_request` was called for a specific pull
    pub fn assert_merge_called(&self, number: u64) {
        let calls = self.get_merge_calls();
        assert!(
            calls.contains(&number),
            "Expected merge_pull_request({number}) but got: {calls:?}"
        );
    }

    /// Assert that `merge_pull_request` was not called at all
    pub fn assert_merge_not_called(&self) {
        let calls = self.get_merge_calls();
        assert!(
            calls.is_empty(),
            "Expected merge_pull_request NOT to be called but it was: {calls:?}"
        );
    }

    /// Assert that `list_reviews` was not called at all
    pub fn assert_reviews_not_fetched(&self) {
        let calls = self.get_list_review_calls();
        assert!(
            calls.is_empty(),
            "Expected list_reviews NOT to be called but it was: {calls:?}"
        );
    }

    /// Assert that `create_issue` was not called at all
    pub fn assert_create_issue_not_called(&self) {
        let calls = self.get_create_issue_calls();
        assert!(
            calls.is_empty(),
            "Expected create_issue NOT to be called but it was: {calls:?}"
        );
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn get_pull_request(&self, number: u64) -> Result<PullRequest> {
        self.get_pull_calls.lock().unwrap().push(number);

        // Check for injected error
        if let Some(msg) = self.error_on_get_pull.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let responses = self.pull_responses.lock().unwrap();
        responses.get(&number).cloned().ok_or_else(|| {
            Error::GitHubApi(format!(
                "get_pull_request: no response configured for PR #{number}"
            ))
        })
    }

    async fn list_statuses(&self, ref_name: &str) -> Result<Vec<CommitStatus>> {
        self.list_status_calls
            .lock()
            .unwrap()
            .push(ref_name.to_string());

        // Check for injected error
        if let Some(msg) = self.error_on_list_statuses.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let responses = self.status_responses.lock().unwrap();
        Ok(responses.get(ref_name).cloned().unwrap_or_default())
    }

    async fn list_check_runs(&self, ref_name: &str) -> Result<Vec<CheckRun>> {
        self.list_check_run_calls
            .lock()
            .unwrap()
            .push(ref_name.to_string());

        let responses = self.check_run_responses.lock().unwrap();
        Ok(responses.get(ref_name).cloned().unwrap_or_default())
    }

    async fn list_reviews(&self, number: u64) -> Result<Vec<Review>> {
        self.list_review_calls.lock().unwrap().push(number);

        let responses = self.review_responses.lock().unwrap();
        Ok(responses.get(&number).cloned().unwrap_or_default())
    }

    async fn list_collaborators(&self) -> Result<Vec<Collaborator>> {
        Ok(self.collaborator_response.lock().unwrap().clone())
    }

    async fn find_open_pull_by_head(&self, branch: &str) -> Result<Option<PullRequest>> {
        self.find_pull_calls.lock().unwrap().push(branch.to_string());

        let responses = self.find_pull_responses.lock().unwrap();
        Ok(responses.get(branch).cloned().flatten())
    }

    async fn merge_pull_request(&self, number: u64) -> Result<()> {
        self.merge_calls.lock().unwrap().push(number);

        // Check for injected error
        if let Some(msg) = self.error_on_merge.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(())
    }

    async fn find_issue_by_title(&self, title: &str) -> Result<Option<Issue>> {
        self.find_issue_calls.lock().unwrap().push(title.to_string());

        let responses = self.issue_responses.lock().unwrap();
        Ok(responses.get(title).cloned())
    }

    async fn create_issue(&self, title: &str, body: &str, labels: &[String]) -> Result<Issue> {
        self.create_issue_calls.lock().unwrap().push(CreateIssueCall {
            title: title.to_string(),
            body: body.to_string(),
            labels: labels.to_vec(),
        });

        // Check for injected error
        if let Some(msg) = self.error_on_create_issue.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let number = self.next_issue_number.fetch_add(1, Ordering::SeqCst);
        Ok(Issue {
            number,
            html_url: format!("https://github.com/malleatus/nyx-example/issues/{number}"),
        })
    }

    fn repository(&self) -> &Repository {
        &self.repository
    }
}

/// Decision stub that records every dispatch and returns a fixed outcome
pub struct StubDecision {
    outcome: Outcome,
    calls: Mutex<Vec<u64>>,
}

impl StubDecision {
    /// Create a stub that resolves every decision to `outcome`
    pub fn returning(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Get all pull numbers that `decide` was called with
    pub fn get_decide_calls(&self) -> Vec<u64> {
        self.calls.lock().unwrap().clone()
    }

    /// Assert that `decide` was called for a specific pull
    pub fn assert_decided(&self, number: u64) {
        let calls = self.get_decide_calls();
        assert!(
            calls.contains(&number),
            "Expected decide({number}) but got: {calls:?}"
        );
    }

    /// Assert that `decide` was not called at all
    pub fn assert_not_decided(&self) {
        let calls = self.get_decide_calls();
        assert!(
            calls.is_empty(),
            "Expected decide NOT to be called but it was: {calls:?}"
        );
    }
}

#[async_trait]
impl MergeDecision for StubDecision {
    async fn decide(&self, pull_number: u64) -> Result<Outcome> {
        self.calls.lock().unwrap().push(pull_number);
        Ok(self.outcome)
    }
}
