//! Error types for nyx

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// All errors nyx can produce
///
/// Ambiguous-but-valid terminal states of a merge evaluation (an unknown
/// status vocabulary, an event with no evaluable pull request) are not
/// errors; they are [`Outcome`](crate::types::Outcome) values. Everything
/// here is fatal: configuration and input problems surface immediately, and
/// GitHub API failures propagate without retry.
#[derive(Debug, Error)]
pub enum Error {
    /// Repository string did not have the `owner/name` shape
    #[error("repository malformed: '{0}'")]
    MalformedRepository(String),

    /// `GITHUB_CONTEXT` was present but could not be decoded as JSON
    #[error("GITHUB_CONTEXT found, but it is not a valid JSON-encoded string: {0}")]
    MalformedContext(String),

    /// Event payload matched neither of the supported workflow event shapes
    #[error("unsupported event payload: {0}")]
    UnsupportedEvent(String),

    /// No credential available from `--token` or `GITHUB_TOKEN`
    #[error("no GitHub token: pass --token or set GITHUB_TOKEN")]
    MissingToken,

    /// Command invoked with an unusable argument combination
    #[error("{0}")]
    Usage(String),

    /// GitHub REST call over the raw HTTP client failed
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// GitHub call through octocrab failed
    #[error("GitHub API error: {0}")]
    Octocrab(#[from] octocrab::Error),
}
