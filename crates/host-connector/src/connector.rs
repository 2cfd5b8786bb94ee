//! Host connector trait and error definitions.

use crate::position::{CommentPosition, DiffRefs};
use crate::provider::RepoProvider;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while submitting comments to the host.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The host rejected or failed the submission.
    #[error("Failed to submit comment: {0}")]
    SubmissionFailed(String),

    /// The connector cannot submit in its current state.
    #[error("Connector unavailable: {0}")]
    Unavailable(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// Uniform interface to the repository host, regardless of provider.
///
/// One implementation exists per provider, selected by a strategy lookup on
/// [`RepoProvider`]. The comment engine only ever talks to this trait; the
/// HTTP plumbing behind it lives with the surrounding application.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across async tasks.
#[async_trait]
pub trait HostConnector: Send + Sync {
    /// Which provider this connector talks to.
    fn provider(&self) -> RepoProvider;

    /// Fetch the diff version metadata needed to anchor a comment.
    ///
    /// Returns `Ok(None)` when the host has no diff version recorded yet
    /// (e.g. a merge request whose diff has not been computed). That is
    /// recoverable at suggestion granularity, not fatal to a batch.
    async fn diff_refs(&self, file: &str, line: u32) -> anyhow::Result<Option<DiffRefs>>;

    /// Create a single inline comment at the given position.
    async fn create_inline_comment(
        &self,
        position: &CommentPosition,
        body: &str,
    ) -> Result<(), ConnectorError>;

    /// Create a batch of inline comments in one call.
    ///
    /// Only meaningful when [`supports_bulk`](Self::supports_bulk) is true;
    /// the default forwarding implementation submits items one by one.
    async fn create_bulk_comments(
        &self,
        comments: &[(CommentPosition, String)],
    ) -> Result<(), ConnectorError> {
        for (position, body) in comments {
            self.create_inline_comment(position, body).await?;
        }
        Ok(())
    }

    /// Whether the host offers a bulk comment-creation path.
    fn supports_bulk(&self) -> bool {
        false
    }
}

/// A no-op connector for read-only or disabled-commenting modes.
pub struct NoOpConnector {
    provider: RepoProvider,
}

impl NoOpConnector {
    pub fn new(provider: RepoProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl HostConnector for NoOpConnector {
    fn provider(&self) -> RepoProvider {
        self.provider
    }

    async fn diff_refs(&self, _file: &str, _line: u32) -> anyhow::Result<Option<DiffRefs>> {
        Ok(None)
    }

    async fn create_inline_comment(
        &self,
        _position: &CommentPosition,
        _body: &str,
    ) -> Result<(), ConnectorError> {
        Err(ConnectorError::Unavailable(
            "Comment submission is disabled".to_string(),
        ))
    }
}
