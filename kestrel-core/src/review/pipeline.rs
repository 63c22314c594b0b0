//! Review orchestration
//!
//! Walks a pull request file by file, hunk by hunk: extract, window,
//! review, post. Every network call can fail on its own, and a failure
//! never consumes more than the item it belongs to. The caller always gets
//! one [`PostResult`] per attempted comment, in file, then hunk, then
//! comment order.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::diff::{build_window, extract_hunks, Hunk, WindowConfig};
use crate::Result;

use super::engine::{EngineError, ReviewEngine};
use super::host::CodeHost;
use super::types::{PostResult, RepoId, ReviewComment};

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(120);

/// The review pipeline, wired once at process start and shared by
/// reference.
///
/// Processing is single-flow: the pipeline suspends at each network call
/// (content fetch, engine invocation, comment post) and resumes with its
/// result before advancing, so result ordering holds by construction.
pub struct ReviewPipeline {
    host: Arc<dyn CodeHost>,
    engine: Arc<dyn ReviewEngine>,
    window: WindowConfig,
    call_timeout: Duration,
}

impl ReviewPipeline {
    /// Create a pipeline over a code host and a review engine
    pub fn new(host: Arc<dyn CodeHost>, engine: Arc<dyn ReviewEngine>) -> Self {
        Self {
            host,
            engine,
            window: WindowConfig::default(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Set the context window sizing
    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    /// Set the per-call timeout for engine invocations
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Review a pull request and post the resulting inline comments.
    ///
    /// Returns one [`PostResult`] per attempted comment, ordered by file,
    /// then hunk within file, then comment within hunk. Partial success is
    /// normal: an engine failure degrades to zero comments for its hunk, a
    /// host failure to an error entry. Only failing to resolve the PR head
    /// or list its changed files aborts the call.
    pub async fn review_pull_request(
        &self,
        repo: &RepoId,
        pr_number: u64,
    ) -> Result<Vec<PostResult>> {
        info!(repo = %repo, pr_number, engine = self.engine.name(), "reviewing pull request");

        let head_sha = self.host.pull_head_sha(repo, pr_number).await?;
        let files = self.host.changed_files(repo, pr_number).await?;
        debug!(files = files.len(), head = %head_sha, "fetched changed files");

        let mut results = Vec::new();

        for file in &files {
            let patch = match file.patch.as_deref() {
                Some(patch) if !patch.is_empty() => patch,
                _ => {
                    debug!(path = %file.filename, "no patch text, skipping file");
                    continue;
                }
            };

            let contents = match self
                .host
                .file_content(repo, &head_sha, &file.filename)
                .await
            {
                Ok(contents) => contents,
                Err(err) => {
                    warn!(path = %file.filename, error = %err, "failed to fetch file contents, skipping file");
                    results.push(PostResult::error(
                        &file.filename,
                        None,
                        format!("failed to fetch file contents: {err}"),
                    ));
                    continue;
                }
            };

            self.review_file(
                repo,
                pr_number,
                &head_sha,
                &file.filename,
                patch,
                &contents,
                &mut results,
            )
            .await;
        }

        info!(
            attempted = results.len(),
            posted = results.iter().filter(|r| r.is_success()).count(),
            "review complete"
        );

        Ok(results)
    }

    #[allow(clippy::too_many_arguments)]
    async fn review_file(
        &self,
        repo: &RepoId,
        pr_number: u64,
        head_sha: &str,
        path: &str,
        patch: &str,
        contents: &str,
        results: &mut Vec<PostResult>,
    ) {
        let hunks = extract_hunks(patch);
        debug!(path, hunks = hunks.len(), "extracted hunks");

        for hunk in &hunks {
            if !hunk.covers_new_lines() {
                debug!(path, header = %hunk.header, "hunk covers no new-file lines, skipping");
                continue;
            }

            let window = build_window(contents, hunk.start, hunk.end, &self.window);
            let comments = self.review_hunk(path, &window, hunk).await;

            for comment in &comments {
                results.push(
                    self.post_comment(repo, pr_number, head_sha, path, hunk, comment)
                        .await,
                );
            }
        }
    }

    /// Invoke the engine for one hunk. Any engine-side failure (schema
    /// mismatch, backend error, timeout) degrades to zero comments.
    async fn review_hunk(&self, path: &str, window: &str, hunk: &Hunk) -> Vec<ReviewComment> {
        let call = self.engine.review(path, window, hunk);

        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(Ok(comments)) => {
                debug!(
                    path,
                    start = hunk.start,
                    end = hunk.end,
                    comments = comments.len(),
                    "engine returned comments"
                );
                comments
            }
            Ok(Err(EngineError::Schema(detail))) => {
                warn!(path, start = hunk.start, detail, "engine output failed schema validation, treating as no comments");
                Vec::new()
            }
            Ok(Err(EngineError::Backend(detail))) => {
                warn!(path, start = hunk.start, detail, "engine call failed, skipping hunk");
                Vec::new()
            }
            Err(_) => {
                warn!(path, start = hunk.start, timeout = ?self.call_timeout, "engine call timed out, skipping hunk");
                Vec::new()
            }
        }
    }

    async fn post_comment(
        &self,
        repo: &RepoId,
        pr_number: u64,
        head_sha: &str,
        path: &str,
        hunk: &Hunk,
        comment: &ReviewComment,
    ) -> PostResult {
        // A line outside the hunk range would land on the wrong code or be
        // rejected by the host; refuse it before it goes out.
        if !hunk.contains_line(comment.line) {
            warn!(
                path,
                line = comment.line,
                start = hunk.start,
                end = hunk.end,
                "comment line outside hunk range, rejecting"
            );
            return PostResult::error(
                path,
                Some(comment.line),
                format!(
                    "comment line {} outside hunk range {}..={}",
                    comment.line, hunk.start, hunk.end
                ),
            );
        }

        match self
            .host
            .post_line_comment(repo, pr_number, head_sha, path, comment.line, &comment.text)
            .await
        {
            Ok(id) => {
                debug!(path, line = comment.line, id, "posted comment");
                PostResult::success(path, comment.line, id)
            }
            Err(err) => {
                warn!(path, line = comment.line, error = %err, "failed to post comment");
                PostResult::error(path, Some(comment.line), err.to_string())
            }
        }
    }
}
