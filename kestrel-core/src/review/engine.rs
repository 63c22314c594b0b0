//! Review engine seam
//!
//! The engine is whatever turns a context window plus a hunk into
//! structured inline comments. The pipeline depends only on this trait;
//! concrete backends live in their own crates.

use async_trait::async_trait;
use thiserror::Error;

use crate::diff::Hunk;

use super::types::ReviewComment;

/// Errors a review engine can produce for a single hunk.
///
/// Both variants are recoverable: the pipeline logs them, treats the hunk
/// as having no comments, and moves on.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine's structured output failed to validate against the
    /// expected comment schema
    #[error("review output failed schema validation: {0}")]
    Schema(String),

    /// The engine call itself failed (transport, backend, bad response)
    #[error("review backend error: {0}")]
    Backend(String),
}

/// Result type for engine invocations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Capability interface for producing review comments for one hunk.
#[async_trait]
pub trait ReviewEngine: Send + Sync {
    /// Name of this engine, for logging
    fn name(&self) -> &'static str;

    /// Review one hunk of the file at `path`, with `window` as the
    /// line-numbered nearby code.
    ///
    /// Returns zero or more comments whose `line` values should fall in
    /// the hunk's new-file range. The call suspends on network I/O for the
    /// duration of one model invocation; no retry happens at this layer.
    async fn review(&self, path: &str, window: &str, hunk: &Hunk)
        -> EngineResult<Vec<ReviewComment>>;
}
