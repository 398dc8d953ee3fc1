//! The comment source the feed synchronizer depends on.

use std::sync::Arc;

use crate::client::FeedClient;
use crate::error::ClientError;
use crate::types::Comment;

/// Remote comment set that can be listed and wiped.
///
/// Implementations are blocking; async callers run them on a blocking pool,
/// hence the `Send + Sync` bound.
pub trait CommentBackend: Send + Sync {
    /// Fetch up to `limit` comments in backend order.
    fn fetch_comments(&self, limit: u32) -> Result<Vec<Comment>, ClientError>;

    /// Delete every comment.
    fn delete_all_comments(&self) -> Result<(), ClientError>;
}

impl CommentBackend for FeedClient {
    fn fetch_comments(&self, limit: u32) -> Result<Vec<Comment>, ClientError> {
        FeedClient::fetch_comments(self, limit)
    }

    fn delete_all_comments(&self) -> Result<(), ClientError> {
        FeedClient::delete_all_comments(self)
    }
}

impl<T: CommentBackend + ?Sized> CommentBackend for Arc<T> {
    fn fetch_comments(&self, limit: u32) -> Result<Vec<Comment>, ClientError> {
        (**self).fetch_comments(limit)
    }

    fn delete_all_comments(&self) -> Result<(), ClientError> {
        (**self).delete_all_comments()
    }
}
