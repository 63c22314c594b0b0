//! Data model for the review pipeline
//!
//! All entities here are created fresh per review invocation and discarded
//! once the aggregated results are returned; nothing is cached across
//! requests.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A repository identity on the code host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoId {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoId {
    /// Create a repository identity from owner and name
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Change status of a file within a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
}

/// One changed file of a pull request, as listed by the code host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChange {
    /// Path of the file in the new tree
    pub filename: String,
    /// Change status
    pub status: FileStatus,
    /// Number of added lines
    pub additions: u64,
    /// Number of removed lines
    pub deletions: u64,
    /// Total changed lines
    pub changes: u64,
    /// Raw unified-diff patch text; absent for binary or oversized files
    pub patch: Option<String>,
}

/// An inline comment produced by the review engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewComment {
    /// Human-readable comment text
    pub text: String,
    /// 1-based new-file line the comment attaches to; must fall inside the
    /// originating hunk's range to be postable
    pub line: u64,
}

/// Outcome of one comment-posting attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PostOutcome {
    /// The host accepted the comment
    Success {
        /// Host-assigned comment id
        id: u64,
    },
    /// The host rejected the comment, or it was never sent
    Error {
        /// Diagnostic message
        message: String,
    },
}

/// One entry of the aggregated review result, per attempted comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResult {
    /// File the comment targeted
    pub path: String,
    /// Line the comment targeted, when one was known
    pub line: Option<u64>,
    /// What happened
    #[serde(flatten)]
    pub outcome: PostOutcome,
}

impl PostResult {
    /// A successfully posted comment
    pub fn success(path: impl Into<String>, line: u64, id: u64) -> Self {
        Self {
            path: path.into(),
            line: Some(line),
            outcome: PostOutcome::Success { id },
        }
    }

    /// A failed or rejected comment
    pub fn error(path: impl Into<String>, line: Option<u64>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line,
            outcome: PostOutcome::Error {
                message: message.into(),
            },
        }
    }

    /// Whether the comment reached the host
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, PostOutcome::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_id_display() {
        assert_eq!(RepoId::new("octo", "spoon").to_string(), "octo/spoon");
    }

    #[test]
    fn test_post_result_success() {
        let result = PostResult::success("src/lib.rs", 12, 99);
        assert!(result.is_success());
        assert_eq!(result.line, Some(12));
    }

    #[test]
    fn test_post_result_error() {
        let result = PostResult::error("src/lib.rs", None, "permission denied");
        assert!(!result.is_success());
        assert_eq!(
            result.outcome,
            PostOutcome::Error {
                message: "permission denied".to_string()
            }
        );
    }
}
