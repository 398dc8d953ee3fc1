//! Error types for the comment feed.

use folio_client::ClientError;

/// Error from a comment feed operation.
///
/// None of these are fatal: the displayed list is left as it was and the
/// user can retry the action.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The backend request failed or returned an unusable body.
    #[error("backend request failed: {0}")]
    Backend(#[from] ClientError),

    /// No entry at the given position.
    #[error("no comment entry at position {index} (showing {len})")]
    EntryOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of displayed entries.
        len: usize,
    },

    /// The blocking task running a backend call panicked or was cancelled.
    #[error("background request task failed: {0}")]
    Task(String),
}
