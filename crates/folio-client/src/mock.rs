//! In-memory backend for testing.
//!
//! Provides [`MockBackend`] for exercising the comment feed without a server.

use std::collections::VecDeque;
use std::sync::RwLock;

use crate::backend::CommentBackend;
use crate::error::ClientError;
use crate::types::Comment;

/// Mock comment backend.
///
/// Holds comments in memory, newest first, and answers fetches with the
/// first `limit` of them. Failures can be queued per operation; each queued
/// failure is returned once, in order, before normal behavior resumes.
///
/// # Example
///
/// ```ignore
/// use folio_client::{Comment, CommentBackend, MockBackend};
///
/// let backend = MockBackend::new()
///     .with_comment(Comment::new("hi", "1/2/2020"))
///     .with_fetch_failure(503);
///
/// assert!(backend.fetch_comments(5).is_err());
/// assert_eq!(backend.fetch_comments(5).unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockBackend {
    comments: RwLock<Vec<Comment>>,
    fetch_failures: RwLock<VecDeque<u16>>,
    delete_failures: RwLock<VecDeque<u16>>,
    malformed_fetches: RwLock<usize>,
    fetch_limits: RwLock<Vec<u32>>,
    delete_calls: RwLock<usize>,
}

impl MockBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stored comment.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_comment(self, comment: Comment) -> Self {
        self.comments.write().unwrap().push(comment);
        self
    }

    /// Append several stored comments.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_comments(self, comments: impl IntoIterator<Item = Comment>) -> Self {
        self.comments.write().unwrap().extend(comments);
        self
    }

    /// Make the next unconsumed fetch fail with the given HTTP status.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_fetch_failure(self, status: u16) -> Self {
        self.fetch_failures.write().unwrap().push_back(status);
        self
    }

    /// Make the next unconsumed fetch return an unparseable body.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_malformed_fetch(self) -> Self {
        *self.malformed_fetches.write().unwrap() += 1;
        self
    }

    /// Make the next unconsumed delete fail with the given HTTP status.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_delete_failure(self, status: u16) -> Self {
        self.delete_failures.write().unwrap().push_back(status);
        self
    }

    /// Snapshot of the stored comments.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn comments(&self) -> Vec<Comment> {
        self.comments.read().unwrap().clone()
    }

    /// Limits passed to every fetch, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn fetch_limits(&self) -> Vec<u32> {
        self.fetch_limits.read().unwrap().clone()
    }

    /// Number of delete calls, failed ones included.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn delete_calls(&self) -> usize {
        *self.delete_calls.read().unwrap()
    }
}

impl CommentBackend for MockBackend {
    fn fetch_comments(&self, limit: u32) -> Result<Vec<Comment>, ClientError> {
        self.fetch_limits.write().unwrap().push(limit);

        if let Some(status) = self.fetch_failures.write().unwrap().pop_front() {
            return Err(ClientError::HttpResponse {
                status,
                body: "mock fetch failure".to_owned(),
            });
        }

        {
            let mut malformed = self.malformed_fetches.write().unwrap();
            if *malformed > 0 {
                *malformed -= 1;
                if let Err(e) = serde_json::from_str::<Vec<Comment>>("<html>") {
                    return Err(e.into());
                }
            }
        }

        let comments = self.comments.read().unwrap();
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(comments.iter().take(take).cloned().collect())
    }

    fn delete_all_comments(&self) -> Result<(), ClientError> {
        *self.delete_calls.write().unwrap() += 1;

        if let Some(status) = self.delete_failures.write().unwrap().pop_front() {
            return Err(ClientError::HttpResponse {
                status,
                body: "mock delete failure".to_owned(),
            });
        }

        self.comments.write().unwrap().clear();
        Ok(())
    }
}
