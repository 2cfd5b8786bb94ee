//! # diff-map
//!
//! Parses unified diff text into a per-line old/new correspondence model and
//! validates AI-suggested line numbers against it.
//!
//! ## Design Principles
//!
//! This crate is **pure**: no I/O, no async, no provider knowledge. It turns
//! raw diff text into [`DiffLineMapping`] sequences and answers questions
//! about them (is this line commentable? what is the nearest valid line?).
//! Anchoring those answers to a specific platform lives in downstream crates.
//!
//! Parsing is permissive by design. A malformed hunk header degrades to stale
//! line counters for the rest of that hunk instead of failing the whole parse,
//! because the input regularly contains AI-reassembled or truncated diffs.
//!
//! ## Usage
//!
//! ```rust
//! use diff_map::{map_diff_lines, suggest_best_comment_line, Severity};
//!
//! let diff = "@@ -1,3 +1,4 @@\n line1\n+line2\n line3\n line4\n";
//! let mapping = map_diff_lines(diff);
//!
//! // Line 2 is the added line, so it is returned unchanged.
//! assert_eq!(suggest_best_comment_line(&mapping, 2, Severity::Minor), Some(2));
//! ```

pub mod model;
pub mod parser;
pub mod validator;

// Re-export commonly used types
pub use model::{DiffLineKind, DiffLineMapping, FileDiff};
pub use parser::{
    extract_file_path, find_old_line_for_new_line, format_diff_with_line_numbers,
    is_line_in_changed_section, map_diff_lines, split_file_diffs, split_multi_file_diff,
};
pub use validator::{
    find_nearest_valid_line, is_in_commentable_context, suggest_best_comment_line,
    validate_line_range, LineRange, Severity, DEFAULT_MAX_DISTANCE,
};
