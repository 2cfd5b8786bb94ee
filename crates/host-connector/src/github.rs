//! GitHub review comment request contract.
//!
//! These types mirror the fields GitHub's pull request review comment
//! endpoint accepts. They are intentionally separate from the domain model
//! so the resolver core stays fully typed and provider payload shapes are
//! validated at this boundary.

use crate::position::CommentPosition;
use serde::Serialize;

/// Request body for GitHub's create-review-comment endpoint.
///
/// GitHub addresses comments with new-file coordinates only. A multi-line
/// comment sets `start_line` to the range start and `line` to the range end;
/// both sides are always `RIGHT` because this engine never anchors to
/// deleted lines.
#[derive(Debug, Clone, Serialize)]
pub struct GitHubCommentPayload {
    /// SHA of the commit to comment on (the head SHA).
    pub commit_id: String,
    /// File path relative to the repository root.
    pub path: String,
    /// New-file line the comment lands on (range end for multi-line).
    pub line: u32,
    /// Diff side for `line`.
    pub side: &'static str,
    /// Range start for multi-line comments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u32>,
    /// Diff side for `start_line`; only present on multi-line comments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_side: Option<&'static str>,
    /// Comment body (markdown).
    pub body: String,
}

impl GitHubCommentPayload {
    /// Build the payload from a resolved position.
    pub fn from_position(position: &CommentPosition, body: impl Into<String>) -> Self {
        Self {
            commit_id: position.head_sha.clone(),
            path: position.new_path.clone(),
            line: position.new_line,
            side: "RIGHT",
            start_line: position.start_line,
            start_side: position.start_line.map(|_| "RIGHT"),
            body: body.into(),
        }
    }
}
