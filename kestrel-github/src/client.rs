//! GitHub API client using octocrab

use kestrel_core::review::RepoId;
use kestrel_core::Secrets;
use octocrab::Octocrab;
use tracing::{debug, info};

use crate::{Error, Result};

/// GitHub API client for pull-request review operations
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Create a new GitHub client
    ///
    /// Token is loaded from (in priority order):
    /// 1. GITHUB_TOKEN environment variable
    /// 2. ~/.config/kestrel/secrets.toml
    ///
    /// A missing token is a startup failure: review never begins without
    /// credentials.
    pub fn new() -> Result<Self> {
        let secrets = Secrets::load().map_err(|e| Error::Auth(e.to_string()))?;

        let token = secrets.github_token().ok_or_else(|| {
            Error::Auth(
                "GitHub token not found. Set GITHUB_TOKEN environment variable \
                 or add token to ~/.config/kestrel/secrets.toml"
                    .to_string(),
            )
        })?;

        let client = Octocrab::builder()
            .personal_token(token)
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        info!("Created GitHub client");

        Ok(Self { client })
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }

    /// Test the connection by fetching repository info
    pub async fn test_connection(&self, repo: &RepoId) -> Result<()> {
        debug!(repo = %repo, "Testing GitHub connection");

        self.client
            .repos(&repo.owner, &repo.name)
            .get()
            .await
            .map_err(|e| match e {
                octocrab::Error::GitHub { source, .. } => {
                    if source.message.contains("Not Found") {
                        Error::Other(format!("Repository {} not found or not accessible", repo))
                    } else if source.message.contains("Bad credentials") {
                        Error::Auth("Invalid GitHub token".to_string())
                    } else {
                        Error::Api(octocrab::Error::GitHub {
                            source,
                            backtrace: std::backtrace::Backtrace::capture(),
                        })
                    }
                }
                other => Error::Api(other),
            })?;

        info!("GitHub connection successful");
        Ok(())
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient").finish_non_exhaustive()
    }
}

/// Parse a repository reference into a [`RepoId`]
///
/// Supports formats:
/// - owner/repo
/// - https://github.com/owner/repo
/// - git@github.com:owner/repo.git
pub fn parse_repo(input: &str) -> Result<RepoId> {
    // Handle shorthand: owner/repo
    if !input.contains(':') && !input.contains('/') {
        return Err(Error::Parse(format!(
            "Invalid repository format: {}. Expected owner/repo",
            input
        )));
    }

    if !input.contains("://") && !input.contains('@') {
        // Simple owner/repo format
        let parts: Vec<&str> = input.split('/').collect();
        if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
            return Ok(RepoId::new(parts[0], parts[1].trim_end_matches(".git")));
        }
        return Err(Error::Parse(format!(
            "Invalid repository format: {}. Expected owner/repo",
            input
        )));
    }

    // Handle HTTPS URL: https://github.com/owner/repo
    if input.starts_with("https://") || input.starts_with("http://") {
        let url = url::Url::parse(input).map_err(|e| Error::Parse(e.to_string()))?;
        let path = url.path().trim_start_matches('/').trim_end_matches(".git");
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() >= 2 {
            return Ok(RepoId::new(parts[0], parts[1]));
        }
        return Err(Error::Parse(format!("Invalid GitHub URL path: {}", path)));
    }

    // Handle SSH URL: git@github.com:owner/repo.git
    if input.starts_with("git@") {
        if let Some(path) = input.split(':').nth(1) {
            let path = path.trim_end_matches(".git");
            let parts: Vec<&str> = path.split('/').collect();
            if parts.len() >= 2 {
                return Ok(RepoId::new(parts[0], parts[1]));
            }
        }
        return Err(Error::Parse(format!("Invalid SSH URL: {}", input)));
    }

    Err(Error::Parse(format!("Unrecognized URL format: {}", input)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shorthand() {
        let repo = parse_repo("owner/repo").unwrap();
        assert_eq!(repo.owner, "owner");
        assert_eq!(repo.name, "repo");
    }

    #[test]
    fn test_parse_https_url() {
        let repo = parse_repo("https://github.com/owner/repo").unwrap();
        assert_eq!(repo.owner, "owner");
        assert_eq!(repo.name, "repo");
    }

    #[test]
    fn test_parse_https_url_with_git_suffix() {
        let repo = parse_repo("https://github.com/owner/repo.git").unwrap();
        assert_eq!(repo.owner, "owner");
        assert_eq!(repo.name, "repo");
    }

    #[test]
    fn test_parse_ssh_url() {
        let repo = parse_repo("git@github.com:owner/repo.git").unwrap();
        assert_eq!(repo.owner, "owner");
        assert_eq!(repo.name, "repo");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_repo("invalid").is_err());
    }

    #[test]
    fn test_parse_empty_segments_rejected() {
        assert!(parse_repo("/repo").is_err());
        assert!(parse_repo("owner/").is_err());
    }
}
