//! File content fetching at a commit ref

use kestrel_core::review::RepoId;
use tracing::debug;

use crate::{Error, GitHubClient, Result};

impl GitHubClient {
    /// Fetch the full text of `path` at `commit_ref`
    ///
    /// Binary files (no decodable text content) surface as
    /// [`Error::NoContent`], which the pipeline treats as a per-file
    /// failure.
    pub async fn get_file_content(
        &self,
        repo: &RepoId,
        commit_ref: &str,
        path: &str,
    ) -> Result<String> {
        debug!(repo = %repo, commit_ref, path, "Fetching file content");

        let items = self
            .client()
            .repos(&repo.owner, &repo.name)
            .get_content()
            .path(path)
            .r#ref(commit_ref)
            .send()
            .await
            .map_err(Error::Api)?;

        let content = items
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::NoContent {
                path: path.to_string(),
                commit_ref: commit_ref.to_string(),
            })?;

        content.decoded_content().ok_or_else(|| Error::NoContent {
            path: path.to_string(),
            commit_ref: commit_ref.to_string(),
        })
    }
}
