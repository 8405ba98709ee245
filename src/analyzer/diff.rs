//! Unified diff parsing.
//!
//! Classifies the content lines of a `git show` patch into additions (numbered
//! in the new file) and deletions. Paired delete/add lines stay two separate
//! entries; no modification category is derived.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Addition, Deletion, DiffResult, LineChange};

static HUNK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@@ -(\d+),?\d* \+(\d+),?\d* @@").expect("hunk header pattern is valid")
});

const METADATA_PREFIXES: &[&str] = &["diff --git", "index", "---", "+++"];

/// Parse the text of a unified diff for a single file
pub fn parse_diff(diff: &str) -> DiffResult {
    let mut result = DiffResult::default();
    // None until the first well-formed hunk header gives a line context
    let mut line_number: Option<u32> = None;

    for line in diff.lines() {
        if METADATA_PREFIXES.iter().any(|p| line.starts_with(p)) {
            continue;
        }

        if line.starts_with("@@") {
            if let Some(start) = hunk_new_start(line) {
                line_number = Some(start);
            }
            continue;
        }

        let Some(current) = line_number.as_mut() else {
            continue;
        };

        if let Some(content) = line.strip_prefix('+') {
            result.push(LineChange::Addition(Addition {
                line: *current,
                content: content.to_string(),
            }));
            *current = current.saturating_add(1);
        } else if let Some(content) = line.strip_prefix('-') {
            result.push(LineChange::Deletion(Deletion {
                content: content.to_string(),
            }));
        } else if line.starts_with(' ') {
            *current = current.saturating_add(1);
        }
    }

    result
}

/// Start line of the new-file range in a hunk header, if the header is well-formed
fn hunk_new_start(line: &str) -> Option<u32> {
    HUNK_HEADER
        .captures(line)
        .and_then(|caps| caps.get(2))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_addition_between_context() {
        let result = parse_diff("@@ -1,2 +1,3 @@\n line1\n+line2\n line3");
        assert_eq!(
            result.additions,
            vec![Addition {
                line: 2,
                content: "line2".into()
            }]
        );
        assert!(result.deletions.is_empty());
    }

    #[test]
    fn test_full_git_show_output() {
        let diff = "\
diff --git a/src/app.js b/src/app.js
index 3b18e51..a9c2f4d 100644
--- a/src/app.js
+++ b/src/app.js
@@ -10,4 +10,5 @@ function main() {
   const a = 1;
-  const b = 2;
+  const b = 3;
+  const c = 4;
   return a + b;
@@ -40,2 +41,2 @@
-old tail
+new tail
 end
\\ No newline at end of file
";
        let result = parse_diff(diff);
        let lines: Vec<_> = result.additions.iter().map(|a| (a.line, a.content.as_str())).collect();
        assert_eq!(
            lines,
            vec![(11, "  const b = 3;"), (12, "  const c = 4;"), (41, "new tail")]
        );
        let deleted: Vec<_> = result.deletions.iter().map(|d| d.content.as_str()).collect();
        assert_eq!(deleted, vec!["  const b = 2;", "old tail"]);
    }

    #[test]
    fn test_header_without_counts() {
        let result = parse_diff("@@ -0,0 +1 @@\n+only line");
        assert_eq!(result.additions[0].line, 1);
    }

    #[test]
    fn test_malformed_header_keeps_counter() {
        let diff = "@@ -1,1 +5,2 @@\n+a\n@@ garbage @@\n+b";
        let result = parse_diff(diff);
        assert_eq!(result.additions[0].line, 5);
        assert_eq!(result.additions[1].line, 6);
    }

    #[test]
    fn test_no_hunk_header_yields_nothing() {
        let result = parse_diff("+added\n-removed\n context");
        assert!(result.is_empty());
    }

    #[test]
    fn test_line_counter_saturates_at_max() {
        let result = parse_diff("@@ -1,1 +4294967295,3 @@\n ctx\n+last\n+beyond");
        let lines: Vec<_> = result.additions.iter().map(|a| a.line).collect();
        assert_eq!(lines, vec![u32::MAX, u32::MAX]);
    }

    #[test]
    fn test_empty_added_line() {
        let result = parse_diff("@@ -1 +1,2 @@\n a\n+");
        assert_eq!(result.additions.len(), 1);
        assert_eq!(result.additions[0].content, "");
        assert_eq!(result.additions[0].line, 2);
    }

    #[derive(Debug, Clone)]
    enum Body {
        Add(String),
        Del(String),
        Ctx(String),
    }

    fn body_line() -> impl Strategy<Value = Body> {
        let text = "[a-z0-9 ;(){}]{0,12}";
        prop_oneof![
            text.prop_map(Body::Add),
            text.prop_map(Body::Del),
            text.prop_map(Body::Ctx),
        ]
    }

    proptest! {
        #[test]
        fn prop_additions_follow_hunk_numbering(
            start in 1u32..5000,
            body in proptest::collection::vec(body_line(), 0..40),
        ) {
            let mut diff = format!("--- a/f\n+++ b/f\n@@ -1,1 +{start},1 @@\n");
            let mut expected = Vec::new();
            let mut deletions = 0usize;
            let mut counter = start;
            for line in &body {
                match line {
                    Body::Add(s) => {
                        diff.push_str(&format!("+{s}\n"));
                        expected.push((counter, s.clone()));
                        counter += 1;
                    }
                    Body::Del(s) => {
                        diff.push_str(&format!("-{s}\n"));
                        deletions += 1;
                    }
                    Body::Ctx(s) => {
                        diff.push_str(&format!(" {s}\n"));
                        counter += 1;
                    }
                }
            }

            let result = parse_diff(&diff);
            let got: Vec<_> = result.additions.into_iter().map(|a| (a.line, a.content)).collect();
            prop_assert_eq!(got, expected);
            prop_assert_eq!(result.deletions.len(), deletions);
        }

        #[test]
        fn prop_no_header_no_changes(lines in proptest::collection::vec("[+\\- a-z]{0,10}", 0..30)) {
            let diff = lines.join("\n");
            prop_assume!(!diff.contains("@@"));
            prop_assert!(parse_diff(&diff).is_empty());
        }
    }
}
