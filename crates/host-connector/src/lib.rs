//! # host-connector
//!
//! Provider-agnostic anchoring of review comments onto pull/merge request
//! diffs. GitHub and GitLab address diff lines differently: GitHub wants
//! new-file coordinates only, GitLab wants an old/new line pair plus three
//! SHAs. This crate turns a validated `(file, line range)` into the
//! provider-specific [`CommentPosition`] and defines the [`HostConnector`]
//! trait the submission side is written against.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │             HostConnector trait               │
//! │  - diff_refs()                                │
//! │  - create_inline_comment()                    │
//! │  - create_bulk_comments()                     │
//! └──────────────────────────────────────────────┘
//!                       │
//!        one implementation per provider,
//!        selected by RepoProvider strategy lookup
//! ```
//!
//! The crate deliberately contains no HTTP client. Implementations live with
//! the surrounding application; tests here use in-memory doubles.

pub mod connector;
pub mod github;
pub mod gitlab;
pub mod position;
pub mod provider;
pub mod resolver;

pub use connector::{ConnectorError, HostConnector, NoOpConnector};
pub use github::GitHubCommentPayload;
pub use gitlab::GitLabPositionPayload;
pub use position::{CommentPosition, DiffRefs};
pub use provider::RepoProvider;
pub use resolver::resolve_position;
