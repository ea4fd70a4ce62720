//! Merge command - evaluate one pull request and merge it when safe

use crate::cli::resolve_token;
use nyx::context::read_context;
use nyx::error::{Error, Result};
use nyx::merge;
use nyx::provider::GitHubProvider;
use nyx::types::{Outcome, Repository};

/// Arguments for the merge command
#[derive(Debug, Clone, Default)]
pub struct MergeArgs {
    /// Repository owner; must be given together with `repo` and `pull_number`
    pub owner: Option<String>,
    /// Repository name
    pub repo: Option<String>,
    /// Pull request number to evaluate
    pub pull_number: Option<u64>,
    /// Token flag value (falls back to `GITHUB_TOKEN`)
    pub token: Option<String>,
    /// GitHub Enterprise host
    pub host: Option<String>,
}

/// Run the merge command
///
/// With `--owner`, `--repo`, and `--pull-number` the pull request is
/// evaluated directly; with none of the three, the target is resolved from
/// the `GITHUB_CONTEXT` environment variable. A partial flag set is a usage
/// error.
pub async fn run_merge(args: MergeArgs) -> Result<Outcome> {
    let token = resolve_token(args.token)?;

    let outcome = match (args.owner, args.repo, args.pull_number) {
        (Some(owner), Some(name), Some(number)) => {
            let repository = Repository { owner, name };
            let provider = GitHubProvider::new(&token, repository, args.host)?;
            merge::decide(&provider, number).await?
        }
        (None, None, None) => {
            let Some(context) = read_context()? else {
                return Err(Error::Usage(
                    "nothing to evaluate: pass --owner, --repo, and --pull-number, \
                     or run under a workflow with GITHUB_CONTEXT set"
                        .to_string(),
                ));
            };
            merge::merge_by_context(&context, &token, args.host).await?
        }
        _ => {
            return Err(Error::Usage(
                "--owner, --repo, and --pull-number must be provided together".to_string(),
            ));
        }
    };

    println!("{outcome} ({})", outcome.code());
    Ok(outcome)
}
