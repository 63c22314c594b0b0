//! Hunk extraction from unified-diff patches
//!
//! A patch for a single file is a sequence of `@@ -a,b +c,d @@` blocks.
//! Inline comments attach to new-file line numbers, so each hunk records
//! the new-file range it covers: `start` comes from the `+` side of the
//! header, `end` from counting the body lines that exist in the new file.
//! Getting this arithmetic wrong puts comments on the wrong line.

use tracing::warn;

/// One `@@ ... @@` block of a unified diff.
///
/// `start` and `end` are 1-based new-file line numbers, inclusive. A hunk
/// that only removes lines covers nothing in the new file; it carries the
/// sentinel `end = start - 1` (saturating at zero) and
/// [`Hunk::covers_new_lines`] is false for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// First new-file line covered by this hunk
    pub start: u64,
    /// Last new-file line covered, inclusive
    pub end: u64,
    /// The full `@@ -a,b +c,d @@ ...` header line, trailing text included
    pub header: String,
    /// Added/context/removed lines, newline-joined, header excluded
    pub body: String,
}

impl Hunk {
    /// Whether this hunk covers at least one line of the new file.
    pub fn covers_new_lines(&self) -> bool {
        self.start >= 1 && self.end >= self.start
    }

    /// Whether a 1-based new-file line number falls inside this hunk.
    pub fn contains_line(&self, line: u64) -> bool {
        line >= self.start && line <= self.end
    }
}

/// Extract hunks from a unified-diff patch for a single file.
///
/// Returns one [`Hunk`] per parseable `@@` header, in patch order. A patch
/// with no headers yields an empty vec (unchanged or pure-rename file),
/// not an error. A header whose numeric fields fail to parse is skipped
/// together with its body lines, so one broken hunk cannot block review of
/// the rest of the file.
pub fn extract_hunks(patch: &str) -> Vec<Hunk> {
    let mut hunks = Vec::new();
    let mut current: Option<HunkBuilder> = None;

    for line in patch.lines() {
        if line.starts_with("@@ -") {
            if let Some(builder) = current.take() {
                hunks.push(builder.finish());
            }
            match parse_new_start(line) {
                Some(start) => current = Some(HunkBuilder::new(start, line)),
                None => warn!(header = line, "skipping hunk with malformed header"),
            }
        } else if let Some(builder) = current.as_mut() {
            builder.push_line(line);
        }
        // Lines before the first header (diff/---/+++ prelude) are ignored.
    }

    if let Some(builder) = current.take() {
        hunks.push(builder.finish());
    }

    hunks
}

struct HunkBuilder {
    start: u64,
    header: String,
    body: Vec<String>,
    kept: u64,
}

impl HunkBuilder {
    fn new(start: u64, header: &str) -> Self {
        Self {
            start,
            header: header.to_string(),
            body: Vec::new(),
            kept: 0,
        }
    }

    fn push_line(&mut self, line: &str) {
        // '+' and ' ' lines exist in the new file; '-' lines only in the
        // old one. The "\ No newline at end of file" marker is neither.
        if line.starts_with('+') || line.starts_with(' ') {
            self.kept += 1;
        }
        self.body.push(line.to_string());
    }

    fn finish(self) -> Hunk {
        let end = if self.kept == 0 {
            self.start.saturating_sub(1)
        } else {
            self.start + self.kept - 1
        };

        Hunk {
            start: self.start,
            end,
            header: self.header,
            body: self.body.join("\n"),
        }
    }
}

/// Parse the new-file start line out of a `@@ -a[,b] +c[,d] @@` header.
fn parse_new_start(header: &str) -> Option<u64> {
    let ranges = header.strip_prefix("@@ ")?;
    let close = ranges.find(" @@")?;
    let new_range = ranges[..close]
        .split_whitespace()
        .find_map(|token| token.strip_prefix('+'))?;

    new_range.split(',').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_hunk_line_arithmetic() {
        let patch = "@@ -10,3 +10,4 @@ ctx\n line10\n+line11\n line12\n";
        let hunks = extract_hunks(patch);

        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].start, 10);
        assert_eq!(hunks[0].end, 12);
        assert_eq!(hunks[0].header, "@@ -10,3 +10,4 @@ ctx");
        assert_eq!(hunks[0].body, " line10\n+line11\n line12");
    }

    #[test]
    fn test_empty_patch() {
        assert!(extract_hunks("").is_empty());
    }

    #[test]
    fn test_no_headers() {
        assert!(extract_hunks("similarity index 100%\nrename from a\nrename to b\n").is_empty());
    }

    #[test]
    fn test_hunks_returned_in_patch_order() {
        let patch = "@@ -1,2 +1,3 @@\n one\n+two\n three\n@@ -10,1 +11,2 @@\n ten\n+eleven\n";
        let hunks = extract_hunks(patch);

        assert_eq!(hunks.len(), 2);
        assert_eq!(hunks[0].start, 1);
        assert_eq!(hunks[0].end, 3);
        assert_eq!(hunks[1].start, 11);
        assert_eq!(hunks[1].end, 12);
    }

    #[test]
    fn test_header_without_length_fields() {
        let hunks = extract_hunks("@@ -1 +1 @@\n-old\n+new\n");

        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].start, 1);
        assert_eq!(hunks[0].end, 1);
    }

    #[test]
    fn test_end_matches_kept_line_count() {
        let patch = "@@ -5,4 +5,3 @@\n keep\n-gone\n-also gone\n+added\n keep2\n";
        let hunks = extract_hunks(patch);

        // kept lines: " keep", "+added", " keep2"
        assert_eq!(hunks[0].start, 5);
        assert_eq!(hunks[0].end, 7);
    }

    #[test]
    fn test_malformed_header_skipped() {
        let patch = "@@ -x,y +z @@\n+orphan\n@@ -5,1 +5,2 @@\n line5\n+line6\n";
        let hunks = extract_hunks(patch);

        // The malformed hunk is omitted and its body is not attached to
        // any neighbor.
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].start, 5);
        assert_eq!(hunks[0].end, 6);
        assert!(!hunks[0].body.contains("orphan"));
    }

    #[test]
    fn test_removal_only_hunk_sentinel() {
        let patch = "@@ -3,2 +2,0 @@\n-gone\n-also gone\n";
        let hunks = extract_hunks(patch);

        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].start, 2);
        assert_eq!(hunks[0].end, 1);
        assert!(!hunks[0].covers_new_lines());
    }

    #[test]
    fn test_whole_file_removal_sentinel_saturates() {
        let patch = "@@ -1,2 +0,0 @@\n-a\n-b\n";
        let hunks = extract_hunks(patch);

        assert_eq!(hunks[0].start, 0);
        assert_eq!(hunks[0].end, 0);
        assert!(!hunks[0].covers_new_lines());
    }

    #[test]
    fn test_file_prelude_ignored() {
        let patch = "diff --git a/src/lib.rs b/src/lib.rs\n\
                     --- a/src/lib.rs\n\
                     +++ b/src/lib.rs\n\
                     @@ -1,1 +1,2 @@\n line1\n+line2\n";
        let hunks = extract_hunks(patch);

        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].start, 1);
        assert_eq!(hunks[0].end, 2);
        assert!(!hunks[0].body.contains("+++"));
    }

    #[test]
    fn test_no_newline_marker_not_counted() {
        let patch = "@@ -1,1 +1,1 @@\n-old\n+new\n\\ No newline at end of file\n";
        let hunks = extract_hunks(patch);

        assert_eq!(hunks[0].start, 1);
        assert_eq!(hunks[0].end, 1);
    }

    #[test]
    fn test_contains_line() {
        let hunks = extract_hunks("@@ -10,3 +10,4 @@\n line10\n+line11\n line12\n+line13\n");
        let hunk = &hunks[0];

        assert!(hunk.contains_line(10));
        assert!(hunk.contains_line(13));
        assert!(!hunk.contains_line(9));
        assert!(!hunk.contains_line(14));
    }

    #[test]
    fn test_header_trailing_context_preserved() {
        let hunks = extract_hunks("@@ -4,2 +4,3 @@ fn main() {\n a\n+b\n c\n");

        assert_eq!(hunks[0].header, "@@ -4,2 +4,3 @@ fn main() {");
    }
}
