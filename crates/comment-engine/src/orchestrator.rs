//! Sequential batch orchestration of review comment submission.

use crate::format::format_comment_body;
use crate::suggestion::Suggestion;
use diff_map::{suggest_best_comment_line, validate_line_range, FileDiff, LineRange};
use host_connector::{resolve_position, CommentPosition, HostConnector};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;

/// Delay between sequential submissions, to respect host rate limits.
const SUBMIT_DELAY: Duration = Duration::from_millis(100);

/// One suggestion that could not be placed or posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentFailure {
    /// File the suggestion targeted.
    pub file: String,
    /// Line the failure refers to (requested or resolved, whichever exists).
    pub line: u32,
    /// Human-readable reason.
    pub error: String,
}

/// Aggregate result of one review session's comment batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Comments accepted by the host.
    pub successful: usize,
    /// Suggestions dropped or rejected, each with an entry in `errors`.
    pub failed: usize,
    /// Per-suggestion failure records, in input order.
    pub errors: Vec<CommentFailure>,
}

impl BatchOutcome {
    fn record(&mut self, file: &str, line: u32, error: impl Into<String>) {
        self.failed += 1;
        self.errors.push(CommentFailure {
            file: file.to_string(),
            line,
            error: error.into(),
        });
    }
}

/// Validate, anchor, format, and submit a batch of suggestions.
///
/// `diffs_by_file` is keyed by new-side path, as produced by
/// [`diff_map::split_file_diffs`]; each [`FileDiff`] carries the old-side
/// path so renamed files anchor correctly on providers that need it.
///
/// Suggestions are processed in input order. Each one is independently
/// validated against its file's line mapping (correcting the line within the
/// severity's radius when needed), anchored via the connector's diff version
/// metadata, and formatted. Prepared comments are then submitted through the
/// connector's bulk path when it has one, otherwise one by one with a fixed
/// 100 ms delay between items.
///
/// A failing suggestion never aborts the batch; it is recorded in the
/// returned [`BatchOutcome`] and the caller may re-invoke for just the
/// failed items.
pub async fn post_review_comments(
    suggestions: &[Suggestion],
    diffs_by_file: &HashMap<String, FileDiff>,
    connector: &dyn HostConnector,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    let mut prepared: Vec<(CommentPosition, String)> = Vec::new();

    for suggestion in suggestions {
        let Some(requested) = suggestion.start_line else {
            warn!("Skipping suggestion without a line for {:?}", suggestion.file);
            continue;
        };
        if suggestion.file.is_empty() {
            warn!("Skipping suggestion without a file (line {})", requested);
            continue;
        }

        let file_diff = diffs_by_file.get(&suggestion.file);
        let lines = file_diff.map(|f| f.lines.as_slice()).unwrap_or(&[]);
        let old_path = file_diff.map(|f| f.old_path.as_str());

        let range = match validate_line_range(lines, requested, suggestion.end_line) {
            Some(range) => range,
            None => {
                match suggest_best_comment_line(lines, requested, suggestion.severity) {
                    Some(line) => LineRange::single(line),
                    None => {
                        // Better to drop the comment than to post it at an
                        // arbitrary location.
                        outcome.record(
                            &suggestion.file,
                            requested,
                            "no commentable line within reach",
                        );
                        continue;
                    }
                }
            }
        };

        let refs = match connector.diff_refs(&suggestion.file, range.end).await {
            Ok(Some(refs)) => refs,
            Ok(None) => {
                warn!(
                    "No diff version recorded for {}:{}, skipping",
                    suggestion.file, range.end
                );
                outcome.record(&suggestion.file, range.end, "no diff version recorded");
                continue;
            }
            Err(e) => {
                outcome.record(&suggestion.file, range.end, e.to_string());
                continue;
            }
        };

        let position = resolve_position(
            connector.provider(),
            &refs,
            lines,
            old_path,
            &suggestion.file,
            range,
        );
        let body = format_comment_body(suggestion, range);
        debug!(
            "Prepared comment for {}:{}-{}",
            suggestion.file, range.start, range.end
        );
        prepared.push((position, body));
    }

    if prepared.is_empty() {
        info!(
            "No comments to submit: {} suggestion(s) dropped",
            outcome.failed
        );
        return outcome;
    }

    if connector.supports_bulk() {
        match connector.create_bulk_comments(&prepared).await {
            Ok(()) => outcome.successful += prepared.len(),
            Err(e) => {
                for (position, _) in &prepared {
                    outcome.record(&position.new_path, position.new_line, e.to_string());
                }
            }
        }
    } else {
        for (i, (position, body)) in prepared.iter().enumerate() {
            if i > 0 {
                sleep(SUBMIT_DELAY).await;
            }
            match connector.create_inline_comment(position, body).await {
                Ok(()) => outcome.successful += 1,
                Err(e) => outcome.record(&position.new_path, position.new_line, e.to_string()),
            }
        }
    }

    info!(
        "Review comments submitted: {} succeeded, {} failed",
        outcome.successful, outcome.failed
    );
    outcome
}
