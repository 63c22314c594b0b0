//! Pull request metadata and changed-file listing

use chrono::{DateTime, Utc};
use kestrel_core::review::{FileChange, FileStatus, RepoId};
use octocrab::models::pulls::PullRequest as OctocrabPR;
use octocrab::models::repos::DiffEntryStatus;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Error, GitHubClient, Result};

/// Pull request metadata needed for a review pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestInfo {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Current state (open, closed)
    pub state: PrState,
    /// Head commit sha - review comments anchor to this commit
    pub head_sha: String,
    /// Head branch name
    pub head_branch: String,
    /// Base branch name
    pub base_branch: String,
    /// When the PR was created
    pub created_at: DateTime<Utc>,
    /// When the PR was last updated
    pub updated_at: DateTime<Utc>,
}

/// PR state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    Open,
    Closed,
}

impl From<octocrab::models::IssueState> for PrState {
    fn from(state: octocrab::models::IssueState) -> Self {
        match state {
            octocrab::models::IssueState::Open => PrState::Open,
            octocrab::models::IssueState::Closed => PrState::Closed,
            _ => PrState::Open, // Default for unknown states
        }
    }
}

impl From<OctocrabPR> for PullRequestInfo {
    fn from(pr: OctocrabPR) -> Self {
        PullRequestInfo {
            number: pr.number,
            title: pr.title.unwrap_or_default(),
            state: pr.state.map(|s| s.into()).unwrap_or(PrState::Open),
            head_sha: pr.head.sha,
            head_branch: pr.head.ref_field,
            base_branch: pr.base.ref_field,
            created_at: pr.created_at.unwrap_or_else(Utc::now),
            updated_at: pr.updated_at.unwrap_or_else(Utc::now),
        }
    }
}

pub(crate) fn file_status(status: &DiffEntryStatus) -> FileStatus {
    match status {
        DiffEntryStatus::Added => FileStatus::Added,
        DiffEntryStatus::Removed => FileStatus::Removed,
        DiffEntryStatus::Renamed | DiffEntryStatus::Copied => FileStatus::Renamed,
        _ => FileStatus::Modified,
    }
}

impl GitHubClient {
    /// Get pull request metadata by number
    pub async fn get_pull_request(&self, repo: &RepoId, number: u64) -> Result<PullRequestInfo> {
        debug!(repo = %repo, number, "Fetching pull request");

        let pr = self
            .client()
            .pulls(&repo.owner, &repo.name)
            .get(number)
            .await
            .map_err(|e| match &e {
                octocrab::Error::GitHub { source, .. }
                    if source.message.contains("Not Found") =>
                {
                    Error::PrNotFound(number)
                }
                _ => Error::Api(e),
            })?;

        Ok(pr.into())
    }

    /// List the files changed by a pull request
    pub async fn list_changed_files(&self, repo: &RepoId, number: u64) -> Result<Vec<FileChange>> {
        debug!(repo = %repo, number, "Listing changed files");

        let page = self
            .client()
            .pulls(&repo.owner, &repo.name)
            .list_files(number)
            .await
            .map_err(|e| match &e {
                octocrab::Error::GitHub { source, .. }
                    if source.message.contains("Not Found") =>
                {
                    Error::PrNotFound(number)
                }
                _ => Error::Api(e),
            })?;

        let entries = self.client().all_pages(page).await.map_err(Error::Api)?;

        let files: Vec<FileChange> = entries
            .into_iter()
            .map(|entry| FileChange {
                filename: entry.filename,
                status: file_status(&entry.status),
                additions: entry.additions,
                deletions: entry.deletions,
                changes: entry.changes,
                patch: entry.patch,
            })
            .collect();

        info!(repo = %repo, number, count = files.len(), "Fetched changed files");

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pr_state_conversion() {
        assert_eq!(
            PrState::from(octocrab::models::IssueState::Open),
            PrState::Open
        );
        assert_eq!(
            PrState::from(octocrab::models::IssueState::Closed),
            PrState::Closed
        );
    }

    #[test]
    fn test_file_status_mapping() {
        assert_eq!(file_status(&DiffEntryStatus::Added), FileStatus::Added);
        assert_eq!(file_status(&DiffEntryStatus::Removed), FileStatus::Removed);
        assert_eq!(file_status(&DiffEntryStatus::Renamed), FileStatus::Renamed);
        assert_eq!(file_status(&DiffEntryStatus::Copied), FileStatus::Renamed);
        assert_eq!(
            file_status(&DiffEntryStatus::Modified),
            FileStatus::Modified
        );
        assert_eq!(file_status(&DiffEntryStatus::Changed), FileStatus::Modified);
    }
}
