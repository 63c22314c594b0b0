//! Error types for Kestrel

use thiserror::Error;

/// Result type alias for Kestrel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Kestrel operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Code host error that aborts a review (e.g. the PR's changed files
    /// could not be listed at all)
    #[error("Code host error: {0}")]
    Host(#[from] crate::review::HostError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
