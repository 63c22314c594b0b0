//! Error types for engine setup and model management

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up the review engine
///
/// Per-hunk review failures use the recoverable
/// [`kestrel_core::review::EngineError`] instead; this type covers the
/// startup path, where failure is fatal.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Ollama-side failure
    #[error("Ollama error: {0}")]
    Ollama(String),
}
