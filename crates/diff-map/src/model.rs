//! Line correspondence data structures for a parsed unified diff.

/// Line type in the old/new correspondence model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineKind {
    /// Added line (`+`), exists only in the new file.
    Added,
    /// Deleted line (`-`), exists only in the old file.
    Deleted,
    /// Unchanged context line, exists in both files.
    Unchanged,
    /// `@@` hunk header, carries no line numbers.
    Header,
}

/// One entry in the old/new line correspondence for a file's diff.
///
/// Invariants per kind:
/// - `Added`: `old_line` is `None`, `new_line` is `Some`
/// - `Deleted`: `old_line` is `Some`, `new_line` is `None`
/// - `Unchanged`: both are `Some`
/// - `Header`: both are `None`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLineMapping {
    /// Line number in the old file.
    pub old_line: Option<u32>,
    /// Line number in the new file.
    pub new_line: Option<u32>,
    /// Line content without the leading `+`/`-`/space prefix.
    pub content: String,
    /// Line type.
    pub kind: DiffLineKind,
}

impl DiffLineMapping {
    /// Create an added line entry.
    pub fn added(content: impl Into<String>, new_line: u32) -> Self {
        Self {
            old_line: None,
            new_line: Some(new_line),
            content: content.into(),
            kind: DiffLineKind::Added,
        }
    }

    /// Create a deleted line entry.
    pub fn deleted(content: impl Into<String>, old_line: u32) -> Self {
        Self {
            old_line: Some(old_line),
            new_line: None,
            content: content.into(),
            kind: DiffLineKind::Deleted,
        }
    }

    /// Create an unchanged context line entry.
    pub fn unchanged(content: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            old_line: Some(old_line),
            new_line: Some(new_line),
            content: content.into(),
            kind: DiffLineKind::Unchanged,
        }
    }

    /// Create a hunk header entry.
    pub fn header(content: impl Into<String>) -> Self {
        Self {
            old_line: None,
            new_line: None,
            content: content.into(),
            kind: DiffLineKind::Header,
        }
    }

    /// Whether this entry represents a change (added or deleted line).
    pub fn is_change(&self) -> bool {
        matches!(self.kind, DiffLineKind::Added | DiffLineKind::Deleted)
    }

    /// The line number to measure distances against (prefers new_line).
    pub fn anchor_line(&self) -> Option<u32> {
        self.new_line.or(self.old_line)
    }
}

/// A single file's slice of a multi-file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    /// Path in the old revision (the `a/` side).
    pub old_path: String,
    /// Path in the new revision (the `b/` side, differs on rename).
    pub new_path: String,
    /// Ordered line correspondence for this file.
    pub lines: Vec<DiffLineMapping>,
}

impl FileDiff {
    /// Whether this file was renamed between revisions.
    pub fn is_renamed(&self) -> bool {
        self.old_path != self.new_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_kind_invariants() {
        let add = DiffLineMapping::added("new line", 10);
        assert_eq!(add.kind, DiffLineKind::Added);
        assert_eq!(add.old_line, None);
        assert_eq!(add.new_line, Some(10));

        let del = DiffLineMapping::deleted("removed line", 8);
        assert_eq!(del.kind, DiffLineKind::Deleted);
        assert_eq!(del.old_line, Some(8));
        assert_eq!(del.new_line, None);

        let ctx = DiffLineMapping::unchanged("same line", 5, 6);
        assert_eq!(ctx.kind, DiffLineKind::Unchanged);
        assert_eq!(ctx.old_line, Some(5));
        assert_eq!(ctx.new_line, Some(6));

        let hdr = DiffLineMapping::header("@@ -1,3 +1,4 @@");
        assert_eq!(hdr.kind, DiffLineKind::Header);
        assert_eq!(hdr.old_line, None);
        assert_eq!(hdr.new_line, None);
    }

    #[test]
    fn test_anchor_line_prefers_new() {
        assert_eq!(DiffLineMapping::unchanged("x", 3, 7).anchor_line(), Some(7));
        assert_eq!(DiffLineMapping::deleted("x", 4).anchor_line(), Some(4));
        assert_eq!(DiffLineMapping::header("@@").anchor_line(), None);
    }

    #[test]
    fn test_file_diff_rename() {
        let file = FileDiff {
            old_path: "src/old.rs".into(),
            new_path: "src/new.rs".into(),
            lines: Vec::new(),
        };
        assert!(file.is_renamed());
    }
}
