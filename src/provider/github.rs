//! GitHub provider implementation

use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::types::{
    CheckRun, Collaborator, CommitStatus, Issue, PullRequest, Repository, Review, ReviewState,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// GitHub provider using octocrab
///
/// Pull-request and issue mutations go through octocrab. Commit statuses,
/// check runs, collaborators, reviews, and issue search use raw REST calls
/// with purpose-built response types, since octocrab models those endpoints
/// poorly for our needs.
pub struct GitHubProvider {
    client: Octocrab,
    repository: Repository,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// API host for raw requests
    api_host: String,
}

impl GitHubProvider {
    /// Create a new GitHub provider scoped to one repository
    pub fn new(token: &str, repository: Repository, host: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        let api_host = if let Some(ref h) = host {
            let base_url = format!("https://{h}/api/v3");
            builder = builder
                .base_uri(&base_url)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
            format!("{h}/api/v3")
        } else {
            "api.github.com".to_string()
        };

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("malleatus/nyx")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            repository,
            token: token.to_string(),
            http_client,
            api_host,
        })
    }

    /// Build an authenticated GET request against the REST API
    fn api_get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .get(format!("https://{}/{path}", self.api_host))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    fn repo_path(&self, rest: &str) -> String {
        format!(
            "repos/{}/{}/{rest}",
            self.repository.owner, self.repository.name
        )
    }
}

/// Helper to convert an octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        head_ref: pr.head.ref_field.clone(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    }
}

#[async_trait]
impl Provider for GitHubProvider {
    async fn get_pull_request(&self, number: u64) -> Result<PullRequest> {
        debug!(number, "fetching pull request");
        let pr = self
            .client
            .pulls(&self.repository.owner, &self.repository.name)
            .get(number)
            .await?;

        let result = pr_from_octocrab(&pr);
        debug!(number, head_ref = %result.head_ref, "fetched pull request");
        Ok(result)
    }

    async fn list_statuses(&self, ref_name: &str) -> Result<Vec<CommitStatus>> {
        debug!(ref_name, "listing commit statuses");
        let path = self.repo_path(&format!("commits/{ref_name}/statuses"));

        let response = self
            .api_get(&path)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch commit statuses: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Commit status request returned {}",
                response.status()
            )));
        }

        let statuses: Vec<CommitStatus> = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse commit statuses: {e}")))?;

        debug!(ref_name, count = statuses.len(), "listed commit statuses");
        Ok(statuses)
    }

    async fn list_check_runs(&self, ref_name: &str) -> Result<Vec<CheckRun>> {
        #[derive(Deserialize)]
        struct CheckRunsResponse {
            check_runs: Vec<CheckRun>,
        }

        debug!(ref_name, "listing check runs");
        let path = self.repo_path(&format!("commits/{ref_name}/check-runs"));

        let response = self
            .api_get(&path)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch check runs: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Check run request returned {}",
                response.status()
            )));
        }

        let check_runs: CheckRunsResponse = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse check runs: {e}")))?;

        debug!(
            ref_name,
            count = check_runs.check_runs.len(),
            "listed check runs"
        );
        Ok(check_runs.check_runs)
    }

    async fn list_reviews(&self, number: u64) -> Result<Vec<Review>> {
        #[derive(Deserialize)]
        struct WireReview {
            user: Option<WireUser>,
            state: ReviewState,
        }

        #[derive(Deserialize)]
        struct WireUser {
            login: String,
        }

        debug!(number, "listing reviews");
        let path = self.repo_path(&format!("pulls/{number}/reviews"));

        let response = self
            .api_get(&path)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch reviews: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Review request returned {}",
                response.status()
            )));
        }

        let reviews: Vec<WireReview> = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse reviews: {e}")))?;

        // Reviews whose author account was deleted come back with a null user.
        let result: Vec<Review> = reviews
            .into_iter()
            .filter_map(|r| {
                r.user.map(|u| Review {
                    author: u.login,
                    state: r.state,
                })
            })
            .collect();

        debug!(number, count = result.len(), "listed reviews");
        Ok(result)
    }

    async fn list_collaborators(&self) -> Result<Vec<Collaborator>> {
        debug!("listing collaborators");
        let path = self.repo_path("collaborators");

        let response = self
            .api_get(&path)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch collaborators: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Collaborator request returned {}",
                response.status()
            )));
        }

        let collaborators: Vec<Collaborator> = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse collaborators: {e}")))?;

        debug!(count = collaborators.len(), "listed collaborators");
        Ok(collaborators)
    }

    async fn find_open_pull_by_head(&self, branch: &str) -> Result<Option<PullRequest>> {
        debug!(branch, "finding open pull request for head");
        let head = format!("{}:{}", self.repository.owner, branch);

        let prs = self
            .client
            .pulls(&self.repository.owner, &self.repository.name)
            .list()
            .head(head)
            .state(octocrab::params::State::Open)
            .send()
            .await?;

        let result = prs.items.first().map(pr_from_octocrab);
        if let Some(ref pr) = result {
            debug!(number = pr.number, "found open pull request");
        } else {
            debug!("no open pull request found");
        }
        Ok(result)
    }

    async fn merge_pull_request(&self, number: u64) -> Result<()> {
        debug!(number, "merging pull request");
        let result = self
            .client
            .pulls(&self.repository.owner, &self.repository.name)
            .merge(number)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge failed: {e}")))?;

        if !result.merged {
            return Err(Error::GitHubApi(
                result
                    .message
                    .unwrap_or_else(|| "Merge was not performed".to_string()),
            ));
        }

        debug!(number, "merged pull request");
        Ok(())
    }

    async fn find_issue_by_title(&self, title: &str) -> Result<Option<Issue>> {
        #[derive(Deserialize)]
        struct SearchResults {
            items: Vec<Issue>,
        }

        debug!(title, "searching for issue");
        let query = format!("repo:{} is:issue label:CI in:title {title}", self.repository);

        let response = self
            .api_get("search/issues")
            .query(&[("q", query.as_str())])
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to search issues: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Issue search returned {}",
                response.status()
            )));
        }

        let results: SearchResults = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse issue search: {e}")))?;

        let result = results.items.into_iter().next();
        if let Some(ref issue) = result {
            debug!(number = issue.number, "found existing issue");
        } else {
            debug!("no matching issue found");
        }
        Ok(result)
    }

    async fn create_issue(&self, title: &str, body: &str, labels: &[String]) -> Result<Issue> {
        debug!(title, "creating issue");
        let issue = self
            .client
            .issues(&self.repository.owner, &self.repository.name)
            .create(title)
            .body(body)
            .labels(labels.to_vec())
            .send()
            .await?;

        let result = Issue {
            number: issue.number,
            html_url: issue.html_url.to_string(),
        };
        debug!(number = result.number, "created issue");
        Ok(result)
    }

    fn repository(&self) -> &Repository {
        &self.repository
    }
}
