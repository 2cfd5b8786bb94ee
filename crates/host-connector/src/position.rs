//! Anchor position data structures.

/// Diff version metadata from the host, required to anchor a comment.
///
/// GitLab records these per merge-request diff version; for GitHub only the
/// head SHA is strictly needed but connectors return all they have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRefs {
    /// SHA of the base commit the diff was computed against.
    pub base_sha: String,
    /// SHA of the start commit (GitLab diff versions; absent elsewhere).
    pub start_sha: Option<String>,
    /// SHA of the head commit.
    pub head_sha: String,
}

/// A resolved, provider-ready anchor for one inline comment.
///
/// Built fresh per post attempt and never persisted. Which fields carry
/// meaning depends on the provider: GitHub reads `new_line`/`start_line`
/// only, GitLab additionally needs `old_line`, the paths, and all SHAs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPosition {
    /// Base commit SHA.
    pub base_sha: String,
    /// Start commit SHA when the provider records one.
    pub start_sha: Option<String>,
    /// Head commit SHA.
    pub head_sha: String,
    /// Old-side path when it differs from the new-side path (rename).
    pub old_path: Option<String>,
    /// New-side path the comment attaches to.
    pub new_path: String,
    /// Old-file line; `None` for pure additions.
    pub old_line: Option<u32>,
    /// New-file line the comment lands on (range end for multi-line).
    pub new_line: u32,
    /// Range start for multi-line comments.
    pub start_line: Option<u32>,
}

impl CommentPosition {
    /// Whether this anchors a multi-line comment.
    pub fn is_multiline(&self) -> bool {
        self.start_line.is_some()
    }

    /// The covered line range as `(start, end)`.
    pub fn line_range(&self) -> (u32, u32) {
        (self.start_line.unwrap_or(self.new_line), self.new_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(start_line: Option<u32>) -> CommentPosition {
        CommentPosition {
            base_sha: "base".into(),
            start_sha: None,
            head_sha: "head".into(),
            old_path: None,
            new_path: "src/main.rs".into(),
            old_line: None,
            new_line: 20,
            start_line,
        }
    }

    #[test]
    fn test_single_line_range() {
        let pos = position(None);
        assert!(!pos.is_multiline());
        assert_eq!(pos.line_range(), (20, 20));
    }

    #[test]
    fn test_multiline_range() {
        let pos = position(Some(10));
        assert!(pos.is_multiline());
        assert_eq!(pos.line_range(), (10, 20));
    }
}
