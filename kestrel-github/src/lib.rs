//! Kestrel GitHub - GitHub integration for Kestrel
//!
//! This crate implements the code-host seam on top of the GitHub REST
//! API: listing a pull request's changed files, fetching file contents at
//! the PR head, and posting inline review comments.

mod client;
mod comments;
mod content;
mod error;
mod host;
mod pulls;

pub use client::{parse_repo, GitHubClient};
pub use error::{Error, Result};
pub use pulls::{PrState, PullRequestInfo};
