//! Turns a validated line range into a provider-specific anchor.

use crate::position::{CommentPosition, DiffRefs};
use crate::provider::RepoProvider;
use diff_map::{find_old_line_for_new_line, DiffLineMapping, LineRange};
use log::debug;

/// Resolve a provider-ready [`CommentPosition`] for a validated range.
///
/// `lines` must be the original, unclamped mapping for the file - the
/// old-line lookup runs against it so additions and deletions around the
/// corrected line still resolve to the right old-file coordinate.
///
/// - GitHub only reads new-file coordinates: `new_line` is the range end and
///   `start_line` is set for multi-line ranges. `old_line` stays `None`.
/// - GitLab needs the old/new pair: `old_line` comes from the mapping and is
///   `None` for pure additions, which GitLab accepts as long as the SHAs in
///   `refs` are present.
pub fn resolve_position(
    provider: RepoProvider,
    refs: &DiffRefs,
    lines: &[DiffLineMapping],
    old_path: Option<&str>,
    new_path: &str,
    range: LineRange,
) -> CommentPosition {
    let start_line = range.is_multiline().then_some(range.start);

    let old_line = match provider {
        RepoProvider::GitHub => None,
        RepoProvider::GitLab => find_old_line_for_new_line(lines, range.end),
    };

    debug!(
        "Resolved {} anchor for {}:{} (old_line {:?})",
        provider, new_path, range.end, old_line
    );

    CommentPosition {
        base_sha: refs.base_sha.clone(),
        start_sha: refs.start_sha.clone(),
        head_sha: refs.head_sha.clone(),
        old_path: old_path
            .filter(|p| *p != new_path)
            .map(|p| p.to_string()),
        new_path: new_path.to_string(),
        old_line,
        new_line: range.end,
        start_line,
    }
}
