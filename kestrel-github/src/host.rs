//! `CodeHost` implementation for GitHub

use async_trait::async_trait;
use kestrel_core::review::{CodeHost, FileChange, HostResult, RepoId};

use crate::GitHubClient;

#[async_trait]
impl CodeHost for GitHubClient {
    async fn pull_head_sha(&self, repo: &RepoId, pr_number: u64) -> HostResult<String> {
        let pr = self.get_pull_request(repo, pr_number).await?;
        Ok(pr.head_sha)
    }

    async fn changed_files(&self, repo: &RepoId, pr_number: u64) -> HostResult<Vec<FileChange>> {
        Ok(self.list_changed_files(repo, pr_number).await?)
    }

    async fn file_content(
        &self,
        repo: &RepoId,
        commit_ref: &str,
        path: &str,
    ) -> HostResult<String> {
        Ok(self.get_file_content(repo, commit_ref, path).await?)
    }

    async fn post_line_comment(
        &self,
        repo: &RepoId,
        pr_number: u64,
        commit_sha: &str,
        path: &str,
        line: u64,
        text: &str,
    ) -> HostResult<u64> {
        Ok(GitHubClient::post_line_comment(self, repo, pr_number, commit_sha, path, line, text)
            .await?)
    }
}
