//! CLI commands for nyx

pub mod merge;
pub mod report_failure;

use nyx::error::{Error, Result};

/// Environment variable consulted when `--token` is not given
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Resolve the GitHub token from the `--token` flag or the environment
///
/// An empty value counts as missing, so `GITHUB_TOKEN=""` does not slip
/// through as a credential.
pub fn resolve_token(flag: Option<String>) -> Result<String> {
    let token = match flag {
        Some(token) => token,
        None => std::env::var(TOKEN_VAR).unwrap_or_default(),
    };

    if token.is_empty() {
        return Err(Error::MissingToken);
    }
    Ok(token)
}
