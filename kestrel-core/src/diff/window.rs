//! Bounded, line-numbered context windows around a hunk
//!
//! The window is what the review engine sees of the file, so it must stay
//! bounded no matter how large the surrounding file is, while still
//! favoring the hunk's own lines when the hunk exceeds the cap.

use serde::{Deserialize, Serialize};

/// Window sizing parameters (the `[review]` section of the config file).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Hard cap on the number of emitted lines
    pub max_lines: usize,
    /// Context lines added on each side of the hunk range
    pub context_lines: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            max_lines: 60,
            context_lines: 10,
        }
    }
}

/// Build a line-numbered excerpt of `contents` around the 1-based new-file
/// range `[start, end]`.
///
/// Each emitted line is `"<n>: <text>"`, newline-joined. The range is
/// padded by `context_lines` on each side and clamped to the file; if the
/// padded range still exceeds `max_lines` the window is re-centered on it
/// and clamped to `max_lines`. An empty file yields an empty string, and a
/// range beyond the end of the file clamps rather than indexing out of
/// bounds.
pub fn build_window(contents: &str, start: u64, end: u64, config: &WindowConfig) -> String {
    let lines: Vec<&str> = contents.lines().collect();
    let total = lines.len();
    if total == 0 {
        return String::new();
    }

    // 0-based half-open [lo, hi), padded and clamped to the file.
    let lo = (start as usize)
        .saturating_sub(1)
        .saturating_sub(config.context_lines)
        .min(total);
    let hi = (end as usize)
        .saturating_add(config.context_lines)
        .min(total)
        .max(lo);

    let (lo, hi) = if hi - lo > config.max_lines {
        // Re-center a max_lines window on the padded range.
        let center = (lo + hi) / 2;
        let hi = (center.saturating_sub(config.max_lines / 2) + config.max_lines).min(total);
        (hi.saturating_sub(config.max_lines), hi)
    } else {
        (lo, hi)
    };

    lines[lo..hi]
        .iter()
        .enumerate()
        .map(|(offset, line)| format!("{}: {}", lo + offset + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_file(lines: usize) -> String {
        (1..=lines)
            .map(|n| format!("fn item_{n}() {{}}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_empty_file_yields_empty_window() {
        let config = WindowConfig::default();
        assert_eq!(build_window("", 1, 5, &config), "");
    }

    #[test]
    fn test_lines_are_numbered_one_based() {
        let config = WindowConfig {
            max_lines: 60,
            context_lines: 0,
        };
        let window = build_window("alpha\nbeta\ngamma", 2, 2, &config);

        assert_eq!(window, "2: beta");
    }

    #[test]
    fn test_context_padding_clamps_at_file_start() {
        let config = WindowConfig {
            max_lines: 60,
            context_lines: 10,
        };
        let window = build_window(&numbered_file(20), 2, 3, &config);

        assert!(window.starts_with("1: "));
        assert!(window.contains("13: "));
        assert!(!window.contains("14: "));
    }

    #[test]
    fn test_context_padding_clamps_at_file_end() {
        let config = WindowConfig {
            max_lines: 60,
            context_lines: 10,
        };
        let window = build_window(&numbered_file(20), 18, 19, &config);

        assert!(window.starts_with("8: "));
        assert!(window.ends_with("fn item_20() {}"));
    }

    #[test]
    fn test_window_never_exceeds_max_lines() {
        let file = numbered_file(500);
        let config = WindowConfig {
            max_lines: 60,
            context_lines: 10,
        };

        for (start, end) in [(1, 1), (1, 200), (100, 400), (250, 250), (490, 500)] {
            let window = build_window(&file, start, end, &config);
            assert!(
                window.lines().count() <= config.max_lines,
                "window for [{start}, {end}] exceeded cap"
            );
        }
    }

    #[test]
    fn test_oversized_hunk_recenters_on_padded_range() {
        let file = numbered_file(1000);
        let config = WindowConfig {
            max_lines: 60,
            context_lines: 10,
        };
        let window = build_window(&file, 100, 400, &config);
        let lines: Vec<&str> = window.lines().collect();

        assert_eq!(lines.len(), 60);
        // Padded range is [90, 410); its center is 250 (1-based line 250).
        assert!(lines[0].starts_with("220: "));
        assert!(lines[59].starts_with("279: "));
    }

    #[test]
    fn test_range_beyond_file_clamps_to_empty() {
        let config = WindowConfig {
            max_lines: 60,
            context_lines: 0,
        };
        assert_eq!(build_window(&numbered_file(5), 100, 120, &config), "");
    }

    #[test]
    fn test_small_file_entirely_within_window() {
        let config = WindowConfig::default();
        let window = build_window("only\ntwo", 1, 2, &config);

        assert_eq!(window, "1: only\n2: two");
    }
}
