//! Review prompt construction
//!
//! The prompt carries three things: the line-numbered context window, the
//! hunk under review, and a description of the JSON shape the model must
//! emit. Line numbers in the output must refer to the new version of the
//! file, so the bounds are restated explicitly.

use kestrel_core::diff::Hunk;

/// JSON shape the model must emit, restated verbatim in the prompt
pub(crate) const OUTPUT_SCHEMA: &str = r#"{
    "comments": [
        {
            "content": "<comment text>",
            "line": <1-based line number in the new version of the file>
        }
    ]
}"#;

/// Build the review prompt for one hunk
pub(crate) fn review_prompt(path: &str, window: &str, hunk: &Hunk) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are reviewing one hunk of a pull request. Point out real \
         problems: bugs, missed edge cases, misleading names. Do not \
         comment on style or on code outside the hunk.\n\n",
    );

    prompt.push_str(&format!("File: {}\n\n", path));

    prompt.push_str("Nearby code, each line prefixed with its line number:\n");
    prompt.push_str(window);
    prompt.push_str("\n\n");

    prompt.push_str("The hunk under review:\n");
    prompt.push_str(&hunk.header);
    prompt.push('\n');
    prompt.push_str(&hunk.body);
    prompt.push_str("\n\n");

    prompt.push_str("Output format: JSON according to schema:\n");
    prompt.push_str(OUTPUT_SCHEMA);
    prompt.push_str(&format!(
        "\n\nEvery line number must be between {} and {}. \
         If the hunk needs no comments, return {{\"comments\": []}}.\n",
        hunk.start, hunk.end
    ));

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hunk() -> Hunk {
        Hunk {
            start: 10,
            end: 12,
            header: "@@ -10,3 +10,4 @@ fn main() {".to_string(),
            body: " line10\n+line11\n line12".to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_window_and_hunk() {
        let prompt = review_prompt("src/lib.rs", "10: line10\n11: line11", &hunk());

        assert!(prompt.contains("File: src/lib.rs"));
        assert!(prompt.contains("10: line10"));
        assert!(prompt.contains("@@ -10,3 +10,4 @@ fn main() {"));
        assert!(prompt.contains("+line11"));
    }

    #[test]
    fn test_prompt_states_line_bounds_and_schema() {
        let prompt = review_prompt("src/lib.rs", "", &hunk());

        assert!(prompt.contains("between 10 and 12"));
        assert!(prompt.contains("\"comments\""));
        assert!(prompt.contains("{\"comments\": []}"));
    }
}
