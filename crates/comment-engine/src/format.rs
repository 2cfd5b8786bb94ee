//! Review comment body formatting.

use crate::suggestion::Suggestion;
use diff_map::{LineRange, Severity};

fn glyph(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🔴",
        Severity::Major => "🟠",
        Severity::Minor => "🟡",
        Severity::Info => "🔵",
    }
}

fn label(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "Critical",
        Severity::Major => "Major",
        Severity::Minor => "Minor",
        Severity::Info => "Info",
    }
}

/// Render the markdown body for one suggestion.
///
/// Severity glyph and label, the action, the reason, an optional fenced diff
/// patch, and a `Lines X-Y` annotation when the validated range spans more
/// than one line.
pub fn format_comment_body(suggestion: &Suggestion, range: LineRange) -> String {
    let mut body = format!(
        "{} **{}**: {}\n\n{}",
        glyph(suggestion.severity),
        label(suggestion.severity),
        suggestion.action,
        suggestion.reason
    );

    if let Some(patch) = &suggestion.patch {
        body.push_str("\n\n```diff\n");
        body.push_str(patch);
        body.push_str("\n```");
    }

    if range.is_multiline() {
        body.push_str(&format!("\n\n_Lines {}-{}_", range.start, range.end));
    }

    body
}
