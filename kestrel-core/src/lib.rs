//! Kestrel Core - Core library for the Kestrel pull-request reviewer
//!
//! This crate provides the review pipeline: unified-diff hunk extraction,
//! bounded context windowing, and the orchestration loop that drives a
//! review engine over each hunk and posts its comments back to the code
//! host.

pub mod config;
pub mod diff;
pub mod error;
pub mod review;
pub mod secrets;

pub use config::{Config, EngineConfig};
pub use error::{Error, Result};
pub use secrets::Secrets;
