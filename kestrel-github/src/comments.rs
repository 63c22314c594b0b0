//! Inline review comment posting

use kestrel_core::review::RepoId;
use serde::Serialize;
use tracing::{debug, info};

use crate::{Error, GitHubClient, Result};

/// Request body for `POST /repos/{owner}/{repo}/pulls/{number}/comments`
#[derive(Debug, Serialize)]
pub(crate) struct NewLineComment<'a> {
    /// Comment text
    pub body: &'a str,
    /// Commit the comment anchors to (the PR head)
    pub commit_id: &'a str,
    /// File path relative to the repository root
    pub path: &'a str,
    /// 1-based line in the new version of the file
    pub line: u64,
    /// Which side of the diff the line belongs to
    pub side: &'a str,
}

impl GitHubClient {
    /// Post one inline comment on the new side of a pull request diff
    ///
    /// Returns the host-assigned comment id. Rejections (line not part of
    /// the diff context, insufficient permissions) come back as [`Error`]
    /// values for the caller to record, never as panics.
    pub async fn post_line_comment(
        &self,
        repo: &RepoId,
        pr_number: u64,
        commit_sha: &str,
        path: &str,
        line: u64,
        text: &str,
    ) -> Result<u64> {
        debug!(repo = %repo, pr_number, path, line, "Posting review comment");

        let route = format!(
            "/repos/{}/{}/pulls/{}/comments",
            repo.owner, repo.name, pr_number
        );
        let body = NewLineComment {
            body: text,
            commit_id: commit_sha,
            path,
            line,
            side: "RIGHT",
        };

        // The high-level pulls handler covers listing review comments but
        // not creating them; go through the typed raw route instead.
        let comment: octocrab::models::pulls::Comment = self
            .client()
            .post(route, Some(&body))
            .await
            .map_err(Error::Api)?;

        info!(repo = %repo, pr_number, path, line, id = comment.id.0, "Posted review comment");

        Ok(comment.id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_line_comment_serialization() {
        let body = NewLineComment {
            body: "consider handling the error",
            commit_id: "feedc0ffee",
            path: "src/lib.rs",
            line: 12,
            side: "RIGHT",
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["body"], "consider handling the error");
        assert_eq!(value["commit_id"], "feedc0ffee");
        assert_eq!(value["path"], "src/lib.rs");
        assert_eq!(value["line"], 12);
        assert_eq!(value["side"], "RIGHT");
    }
}
