//! Unified-diff parsing and context windowing

mod hunk;
mod window;

pub use hunk::{extract_hunks, Hunk};
pub use window::{build_window, WindowConfig};
