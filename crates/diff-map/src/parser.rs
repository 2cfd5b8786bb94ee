//! Unified diff scanning into the line correspondence model.
//!
//! The scanner walks diff text line by line, tracking running old/new file
//! counters that reset on every `@@` hunk header. It never fails: headers it
//! cannot parse still emit a [`DiffLineKind::Header`] entry and leave the
//! counters stale for the rest of that hunk.

use crate::model::{DiffLineKind, DiffLineMapping, FileDiff};
use log::debug;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// How far (in lines) an added/deleted entry may be for an unchanged line to
/// still count as part of a changed section.
pub(crate) const CHANGED_SECTION_RADIUS: u32 = 3;

fn hunk_header_regex() -> &'static Regex {
    static HUNK_HEADER: OnceLock<Regex> = OnceLock::new();
    HUNK_HEADER.get_or_init(|| {
        // @@ -a[,b] +c[,d] @@ with optional section context after the second @@
        Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").unwrap()
    })
}

fn file_header_regex() -> &'static Regex {
    static FILE_HEADER: OnceLock<Regex> = OnceLock::new();
    FILE_HEADER.get_or_init(|| Regex::new(r"^diff --git a/(.+?) b/(.+)$").unwrap())
}

/// Whether a line is diff metadata rather than hunk content.
fn is_metadata_line(line: &str) -> bool {
    line.starts_with("diff --git")
        || line.starts_with("index ")
        || line.starts_with("---")
        || line.starts_with("+++")
        || line.starts_with("\\ No newline")
}

/// Scan unified diff text into an ordered old/new line correspondence.
///
/// Hunk headers reset the running counters and emit a `Header` entry with no
/// line numbers. Metadata lines (`diff --git`, `index `, `---`, `+++`,
/// `\ No newline...`) emit nothing. Every other line is an added, deleted, or
/// unchanged entry carrying the counters it advanced.
///
/// A header that does not match `@@ -a[,b] +c[,d] @@` still emits a `Header`
/// entry; subsequent lines simply carry stale counters. Parsing never fails.
pub fn map_diff_lines(diff: &str) -> Vec<DiffLineMapping> {
    let mut mapping = Vec::new();
    let mut old_line: u32 = 0;
    let mut new_line: u32 = 0;

    for line in diff.lines() {
        if line.starts_with("@@") {
            if let Some(caps) = hunk_header_regex().captures(line) {
                // Counters sit one below the hunk start so the first content
                // line lands exactly on `a` / `c`.
                let old_start: u32 = caps[1].parse().unwrap_or(1);
                let new_start: u32 = caps[3].parse().unwrap_or(1);
                old_line = old_start.saturating_sub(1);
                new_line = new_start.saturating_sub(1);
            } else {
                debug!("Unparseable hunk header, counters left stale: {}", line);
            }
            mapping.push(DiffLineMapping::header(line));
            continue;
        }

        if is_metadata_line(line) {
            continue;
        }

        if let Some(content) = line.strip_prefix('+') {
            new_line += 1;
            mapping.push(DiffLineMapping::added(content, new_line));
        } else if let Some(content) = line.strip_prefix('-') {
            old_line += 1;
            mapping.push(DiffLineMapping::deleted(content, old_line));
        } else {
            old_line += 1;
            new_line += 1;
            let content = line.strip_prefix(' ').unwrap_or(line);
            mapping.push(DiffLineMapping::unchanged(content, old_line, new_line));
        }
    }

    mapping
}

/// Render a diff with each content line prefixed by its new-file line number,
/// right-justified to 4 characters. Metadata, hunk header, and deleted lines
/// get 4 spaces in place of a number so columns stay aligned.
///
/// The output is fed back to an LLM so it can reference exact line numbers.
pub fn format_diff_with_line_numbers(diff: &str) -> String {
    let mut out = String::new();
    let mut new_line: u32 = 0;

    for line in diff.lines() {
        if line.starts_with("@@") {
            if let Some(caps) = hunk_header_regex().captures(line) {
                let new_start: u32 = caps[3].parse().unwrap_or(1);
                new_line = new_start.saturating_sub(1);
            }
            out.push_str(&format!("    : {}\n", line));
            continue;
        }

        if is_metadata_line(line) {
            out.push_str(&format!("    : {}\n", line));
            continue;
        }

        if line.starts_with('-') {
            out.push_str(&format!("    : {}\n", line));
        } else {
            new_line += 1;
            out.push_str(&format!("{:>4}: {}\n", new_line, line));
        }
    }

    out
}

/// Extract the old-side path from a `diff --git a/X b/Y` header line.
pub fn extract_file_path(header_line: &str) -> Option<String> {
    file_header_regex()
        .captures(header_line)
        .map(|caps| caps[1].to_string())
}

/// Partition a multi-file diff on `diff --git` boundaries.
///
/// Keys are the old-side paths captured by [`extract_file_path`]; values are
/// the per-file diff slices including their `diff --git` line. Every marker
/// opens an entry, so for the usual case of one marker per file the entry
/// count equals the `diff --git` occurrence count. A repeated marker for the
/// same path appends its slice to the existing entry rather than replacing
/// it, so no hunks are lost when an AI-reassembled diff splits one file
/// across several markers. Text before the first marker is dropped.
pub fn split_multi_file_diff(diff: &str) -> HashMap<String, String> {
    let mut files: HashMap<String, String> = HashMap::new();
    let mut current_key: Option<String> = None;
    let mut current_chunk = String::new();

    fn finish(key: Option<String>, chunk: &mut String, files: &mut HashMap<String, String>) {
        if let Some(key) = key {
            files
                .entry(key)
                .or_default()
                .push_str(&std::mem::take(chunk));
        }
    }

    for line in diff.lines() {
        if line.starts_with("diff --git") {
            finish(current_key.take(), &mut current_chunk, &mut files);
            current_key = Some(
                extract_file_path(line)
                    .unwrap_or_else(|| line.trim_start_matches("diff --git ").to_string()),
            );
        }
        if current_key.is_some() {
            current_chunk.push_str(line);
            current_chunk.push('\n');
        }
    }
    finish(current_key, &mut current_chunk, &mut files);

    debug!("Split diff into {} file sections", files.len());
    files
}

/// Ordered variant of [`split_multi_file_diff`] that keeps input order and
/// carries both sides' paths, so callers can build rename-aware anchors.
pub fn split_file_diffs(diff: &str) -> Vec<FileDiff> {
    let mut files: Vec<(String, String, String)> = Vec::new();

    for line in diff.lines() {
        if line.starts_with("diff --git") {
            let (old_path, new_path) = match file_header_regex().captures(line) {
                Some(caps) => (caps[1].to_string(), caps[2].to_string()),
                None => {
                    let raw = line.trim_start_matches("diff --git ").to_string();
                    (raw.clone(), raw)
                }
            };
            files.push((old_path, new_path, String::new()));
        }
        if let Some((_, _, chunk)) = files.last_mut() {
            chunk.push_str(line);
            chunk.push('\n');
        }
    }

    files
        .into_iter()
        .map(|(old_path, new_path, chunk)| FileDiff {
            old_path,
            new_path,
            lines: map_diff_lines(&chunk),
        })
        .collect()
}

/// Find the old-file line corresponding to a new-file line.
///
/// Returns the `old_line` of the first entry whose `new_line` matches, which
/// is `None` for pure additions.
pub fn find_old_line_for_new_line(lines: &[DiffLineMapping], new_line: u32) -> Option<u32> {
    lines
        .iter()
        .find(|m| m.new_line == Some(new_line))
        .and_then(|m| m.old_line)
}

/// Whether any added/deleted entry lies within `distance` lines of `line`.
pub(crate) fn has_change_within(lines: &[DiffLineMapping], line: u32, distance: u32) -> bool {
    lines.iter().any(|m| {
        m.is_change()
            && m.anchor_line()
                .is_some_and(|anchor| anchor.abs_diff(line) <= distance)
    })
}

/// Whether a new-file line sits in a changed section: the line itself is
/// added, or any added/deleted entry lies within 3 lines of it.
pub fn is_line_in_changed_section(lines: &[DiffLineMapping], new_line: u32) -> bool {
    let is_added = lines
        .iter()
        .any(|m| m.new_line == Some(new_line) && m.kind == DiffLineKind::Added);
    is_added || has_change_within(lines, new_line, CHANGED_SECTION_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MULTI_FILE_DIFF: &str = "diff --git a/src/main.rs b/src/main.rs\n\
index abc123..def456 100644\n\
--- a/src/main.rs\n\
+++ b/src/main.rs\n\
@@ -1,5 +1,6 @@\n\
 fn main() {\n\
     println!(\"Hello\");\n\
+    println!(\"World\");\n\
 }\n\
diff --git a/src/lib.rs b/src/lib.rs\n\
index 111222..333444 100644\n\
--- a/src/lib.rs\n\
+++ b/src/lib.rs\n\
@@ -10,3 +10,2 @@\n\
 impl Foo {\n\
-    // old comment\n\
 }\n";

    fn content_entries(mapping: &[DiffLineMapping]) -> Vec<&DiffLineMapping> {
        mapping
            .iter()
            .filter(|m| m.kind != DiffLineKind::Header)
            .collect()
    }

    #[test]
    fn test_map_basic_hunk() {
        let diff = "diff --git a/x.ts b/x.ts\n@@ -1,3 +1,4 @@\n line1\n+line2\n line3\n line4\n";
        let mapping = map_diff_lines(diff);

        assert_eq!(mapping[0], DiffLineMapping::header("@@ -1,3 +1,4 @@"));
        assert_eq!(
            content_entries(&mapping)
                .iter()
                .map(|m| (m.kind, m.old_line, m.new_line))
                .collect::<Vec<_>>(),
            vec![
                (DiffLineKind::Unchanged, Some(1), Some(1)),
                (DiffLineKind::Added, None, Some(2)),
                (DiffLineKind::Unchanged, Some(2), Some(3)),
                (DiffLineKind::Unchanged, Some(3), Some(4)),
            ]
        );
    }

    #[test]
    fn test_context_only_diff_lines_match() {
        let diff = "@@ -1,3 +1,3 @@\n line1\n line2\n line3\n";
        let mapping = map_diff_lines(diff);

        let mut last = 0;
        for entry in content_entries(&mapping) {
            assert_eq!(entry.old_line, entry.new_line);
            let n = entry.new_line.unwrap();
            assert!(n > last, "line numbers must be strictly increasing");
            last = n;
        }
    }

    #[test]
    fn test_hunk_header_resets_counters() {
        let diff = "@@ -10,5 +10,6 @@\n context\n+added\n-removed\n";
        let mapping = map_diff_lines(diff);

        assert_eq!(mapping[0].kind, DiffLineKind::Header);
        // First content line lands exactly on the hunk start
        assert_eq!(mapping[1].old_line, Some(10));
        assert_eq!(mapping[1].new_line, Some(10));
        assert_eq!(mapping[2].new_line, Some(11));
        assert_eq!(mapping[3].old_line, Some(11));
    }

    #[test]
    fn test_malformed_hunk_header_does_not_abort() {
        let diff = "@@ not a real header @@\n context\n+added\n";
        let mapping = map_diff_lines(diff);

        assert_eq!(mapping[0].kind, DiffLineKind::Header);
        // Counters were never reset, so they run from zero
        assert_eq!(mapping[1].kind, DiffLineKind::Unchanged);
        assert_eq!(mapping[1].new_line, Some(1));
        assert_eq!(mapping[2].kind, DiffLineKind::Added);
        assert_eq!(mapping[2].new_line, Some(2));
    }

    #[test]
    fn test_metadata_lines_emit_nothing() {
        let mapping = map_diff_lines(MULTI_FILE_DIFF);
        assert!(mapping
            .iter()
            .all(|m| !m.content.starts_with("diff --git") && !m.content.starts_with("index ")));
    }

    #[test]
    fn test_no_newline_marker_ignored() {
        let diff = "@@ -1,1 +1,1 @@\n-old\n+new\n\\ No newline at end of file\n";
        let mapping = map_diff_lines(diff);
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping[2].kind, DiffLineKind::Added);
    }

    #[test]
    fn test_map_is_deterministic() {
        let first = map_diff_lines(MULTI_FILE_DIFF);
        let second = map_diff_lines(MULTI_FILE_DIFF);
        assert_eq!(first, second);
    }

    #[test]
    fn test_format_with_line_numbers() {
        let diff = "@@ -1,2 +1,3 @@\n line1\n+line2\n-line3\n";
        let formatted = format_diff_with_line_numbers(diff);

        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines[0], "    : @@ -1,2 +1,3 @@");
        assert_eq!(lines[1], "   1:  line1");
        assert_eq!(lines[2], "   2: +line2");
        assert_eq!(lines[3], "    : -line3");
    }

    #[test]
    fn test_extract_file_path() {
        assert_eq!(
            extract_file_path("diff --git a/src/main.rs b/src/main.rs"),
            Some("src/main.rs".to_string())
        );
        assert_eq!(extract_file_path("index abc..def 100644"), None);
    }

    #[test]
    fn test_split_multi_file_count_matches_markers() {
        let files = split_multi_file_diff(MULTI_FILE_DIFF);
        let marker_count = MULTI_FILE_DIFF
            .lines()
            .filter(|l| l.starts_with("diff --git"))
            .count();

        assert_eq!(files.len(), marker_count);
        assert!(files.contains_key("src/main.rs"));
        assert!(files.contains_key("src/lib.rs"));
        // Each chunk is a standalone parseable diff
        assert!(files["src/lib.rs"].starts_with("diff --git a/src/lib.rs"));
    }

    #[test]
    fn test_split_repeated_path_merges_chunks() {
        let diff = "diff --git a/x.ts b/x.ts\n\
@@ -1,2 +1,3 @@\n\
 line1\n\
+line2\n\
diff --git a/x.ts b/x.ts\n\
@@ -10,2 +11,3 @@\n\
 line10\n\
+line11\n";

        let files = split_multi_file_diff(diff);

        // Both slices land under the one path; the later marker must not
        // replace the earlier hunks.
        assert_eq!(files.len(), 1);
        let merged = &files["x.ts"];
        assert!(merged.contains("@@ -1,2 +1,3 @@"));
        assert!(merged.contains("@@ -10,2 +11,3 @@"));
        assert!(merged.contains("+line2"));
        assert!(merged.contains("+line11"));
    }

    #[test]
    fn test_split_no_markers_is_empty() {
        assert!(split_multi_file_diff("@@ -1,1 +1,1 @@\n context\n").is_empty());
    }

    #[test]
    fn test_split_file_diffs_keeps_order_and_paths() {
        let files = split_file_diffs(MULTI_FILE_DIFF);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].new_path, "src/main.rs");
        assert_eq!(files[1].new_path, "src/lib.rs");
        assert!(!files[0].is_renamed());
        assert!(files[0]
            .lines
            .iter()
            .any(|m| m.kind == DiffLineKind::Added));
    }

    #[test]
    fn test_split_file_diffs_rename() {
        let diff = "diff --git a/old_name.rs b/new_name.rs\n@@ -1,1 +1,1 @@\n-a\n+b\n";
        let files = split_file_diffs(diff);
        assert_eq!(files[0].old_path, "old_name.rs");
        assert_eq!(files[0].new_path, "new_name.rs");
        assert!(files[0].is_renamed());
    }

    #[test]
    fn test_find_old_line_for_new_line() {
        let diff = "@@ -1,3 +1,4 @@\n line1\n+line2\n line3\n line4\n";
        let mapping = map_diff_lines(diff);

        assert_eq!(find_old_line_for_new_line(&mapping, 1), Some(1));
        // Line 2 is a pure addition: no old-file correspondence
        assert_eq!(find_old_line_for_new_line(&mapping, 2), None);
        assert_eq!(find_old_line_for_new_line(&mapping, 3), Some(2));
        assert_eq!(find_old_line_for_new_line(&mapping, 99), None);
    }

    #[test]
    fn test_is_line_in_changed_section() {
        let diff = "@@ -1,8 +1,9 @@\n line1\n+line2\n line3\n line4\n line5\n line6\n line7\n line8\n line9\n";
        let mapping = map_diff_lines(diff);

        assert!(is_line_in_changed_section(&mapping, 2)); // the added line
        assert!(is_line_in_changed_section(&mapping, 5)); // within 3 of it
        assert!(!is_line_in_changed_section(&mapping, 9)); // too far away
    }
}
