//! Kestrel Engine - Ollama-backed review engine for Kestrel
//!
//! Drives an Ollama endpoint in JSON mode to produce structured inline
//! review comments, one hunk at a time.

mod error;
mod ollama;
mod prompt;

pub use error::{Error, Result};
pub use ollama::OllamaEngine;
