//! # comment-engine
//!
//! Drives one review session end to end: take AI-produced suggestions,
//! validate and correct their line numbers against the diff's line
//! correspondence, resolve provider anchors, format comment bodies, and
//! submit the batch through a [`host_connector::HostConnector`].
//!
//! ## Partial success is the contract
//!
//! Suggestions are processed strictly in input order, one at a time. A
//! suggestion that cannot be placed (unresolvable line, missing diff
//! version, host rejection) is recorded in the [`BatchOutcome`] and never
//! aborts the rest of the batch. Comments already posted when a session is
//! cancelled stay posted; there is no rollback.

pub mod format;
pub mod orchestrator;
pub mod suggestion;

pub use format::format_comment_body;
pub use orchestrator::{post_review_comments, BatchOutcome, CommentFailure};
pub use suggestion::{parse_suggestions, Suggestion};

// Severity travels with suggestions but is defined next to the validator
// that consumes its search radius.
pub use diff_map::Severity;
