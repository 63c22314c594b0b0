//! Error types for GitHub operations

use kestrel_core::review::HostError;
use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// GitHub API error
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// Pull request not found
    #[error("Pull request #{0} not found")]
    PrNotFound(u64),

    /// File content unavailable at the requested ref
    #[error("No content for {path} at {commit_ref}")]
    NoContent { path: String, commit_ref: String },

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl From<Error> for HostError {
    fn from(err: Error) -> Self {
        match err {
            Error::PrNotFound(number) => HostError::PrNotFound(number),
            Error::Auth(message) => HostError::Auth(message),
            Error::NoContent { path, commit_ref } => {
                HostError::ContentUnavailable { path, commit_ref }
            }
            other => HostError::Api(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pr_not_found_maps_to_host_error() {
        let host_err = HostError::from(Error::PrNotFound(42));
        assert!(matches!(host_err, HostError::PrNotFound(42)));
    }

    #[test]
    fn test_no_content_maps_to_host_error() {
        let host_err = HostError::from(Error::NoContent {
            path: "src/lib.rs".to_string(),
            commit_ref: "abc123".to_string(),
        });
        assert!(matches!(
            host_err,
            HostError::ContentUnavailable { ref path, .. } if path == "src/lib.rs"
        ));
    }

    #[test]
    fn test_other_maps_to_api_host_error() {
        let host_err = HostError::from(Error::Other("boom".to_string()));
        assert!(matches!(host_err, HostError::Api(ref msg) if msg == "boom"));
    }
}
