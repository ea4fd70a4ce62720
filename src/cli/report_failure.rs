//! Report-failure command - file the tracking issue for a failed nightly run

use crate::cli::resolve_token;
use nyx::error::Result;
use nyx::provider::GitHubProvider;
use nyx::report::{report_failure, ReportOutcome};
use nyx::types::Repository;

/// Arguments for the report-failure command
#[derive(Debug, Clone)]
pub struct ReportFailureArgs {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Workflow run id to report
    pub run_id: String,
    /// Token flag value (falls back to `GITHUB_TOKEN`)
    pub token: Option<String>,
    /// GitHub Enterprise host
    pub host: Option<String>,
}

/// Run the report-failure command
pub async fn run_report_failure(args: ReportFailureArgs) -> Result<()> {
    let token = resolve_token(args.token)?;

    let repository = Repository {
        owner: args.owner,
        name: args.repo,
    };
    let provider = GitHubProvider::new(&token, repository, args.host)?;

    match report_failure(&provider, &args.run_id).await? {
        ReportOutcome::Created(issue) => {
            println!("Created issue #{}: {}", issue.number, issue.html_url);
        }
        ReportOutcome::AlreadyReported(issue) => {
            println!(
                "Issue {} already exists for run {}",
                issue.number, args.run_id
            );
        }
    }

    Ok(())
}
