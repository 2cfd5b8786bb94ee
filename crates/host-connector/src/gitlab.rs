//! GitLab merge request discussion position contract.
//!
//! GitLab anchors inline comments with a `position` object carrying three
//! SHAs, both paths, and the old/new line pair. Missing any SHA gets the
//! request rejected, so the builder guarantees all three are populated.

use crate::position::CommentPosition;
use serde::Serialize;

/// The `position` object for GitLab's create-discussion endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GitLabPositionPayload {
    /// Always `"text"` for line comments.
    pub position_type: &'static str,
    /// Base commit SHA of the diff version.
    pub base_sha: String,
    /// Start commit SHA; GitLab rejects positions without it, so it falls
    /// back to the base SHA when the connector recorded none.
    pub start_sha: String,
    /// Head commit SHA of the diff version.
    pub head_sha: String,
    /// Old-side path; equals `new_path` unless the file was renamed.
    pub old_path: String,
    /// New-side path.
    pub new_path: String,
    /// Old-file line; absent for pure additions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_line: Option<u32>,
    /// New-file line.
    pub new_line: u32,
}

impl GitLabPositionPayload {
    /// Build the payload from a resolved position.
    pub fn from_position(position: &CommentPosition) -> Self {
        Self {
            position_type: "text",
            base_sha: position.base_sha.clone(),
            start_sha: position
                .start_sha
                .clone()
                .unwrap_or_else(|| position.base_sha.clone()),
            head_sha: position.head_sha.clone(),
            old_path: position
                .old_path
                .clone()
                .unwrap_or_else(|| position.new_path.clone()),
            new_path: position.new_path.clone(),
            old_line: position.old_line,
            new_line: position.new_line,
        }
    }
}
