//! Code-host seam
//!
//! The host is whatever stores pull requests: it lists changed files,
//! serves file contents at a commit, and accepts line comments. Concrete
//! implementations live in their own crates.

use async_trait::async_trait;
use thiserror::Error;

use super::types::{FileChange, RepoId};

/// Errors surfaced by a code host
#[derive(Error, Debug)]
pub enum HostError {
    /// Pull request does not exist
    #[error("pull request #{0} not found")]
    PrNotFound(u64),

    /// File content is unavailable at the requested ref
    #[error("no content for {path} at {commit_ref}")]
    ContentUnavailable { path: String, commit_ref: String },

    /// Authentication or permission failure
    #[error("code host authentication error: {0}")]
    Auth(String),

    /// Any other host-side failure
    #[error("code host error: {0}")]
    Api(String),
}

/// Result type for code-host operations
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Capability interface for the code host.
#[async_trait]
pub trait CodeHost: Send + Sync {
    /// Head commit sha of a pull request
    async fn pull_head_sha(&self, repo: &RepoId, pr_number: u64) -> HostResult<String>;

    /// Files changed by a pull request
    async fn changed_files(&self, repo: &RepoId, pr_number: u64) -> HostResult<Vec<FileChange>>;

    /// Full text of `path` at `commit_ref`
    async fn file_content(&self, repo: &RepoId, commit_ref: &str, path: &str)
        -> HostResult<String>;

    /// Post one line comment on the new side of the diff; returns the
    /// host-assigned comment id.
    ///
    /// Host-side rejection (line not in the diff context, permissions)
    /// must come back as an `Err`, never a panic: the pipeline records it
    /// as a per-comment failure and keeps going.
    async fn post_line_comment(
        &self,
        repo: &RepoId,
        pr_number: u64,
        commit_sha: &str,
        path: &str,
        line: u64,
        text: &str,
    ) -> HostResult<u64>;
}
