//! Async front for the synchronizer.
//!
//! [`FeedController`] lets several user actions run at once: each backend
//! call runs on tokio's blocking pool while the synchronizer stays available.
//! The lock is held only for the synchronous begin/complete steps, never
//! across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use folio_client::CommentBackend;
use folio_prefs::PreferenceStore;

use crate::error::FeedError;
use crate::sync::{Completion, FeedSynchronizer};
use crate::view::FeedView;

/// Shared handle driving a [`FeedSynchronizer`] against a backend.
pub struct FeedController<B, V, P> {
    backend: Arc<B>,
    sync: Arc<Mutex<FeedSynchronizer<V, P>>>,
}

impl<B, V, P> Clone for FeedController<B, V, P> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            sync: Arc::clone(&self.sync),
        }
    }
}

impl<B, V, P> FeedController<B, V, P>
where
    B: CommentBackend + 'static,
    V: FeedView + 'static,
    P: PreferenceStore + 'static,
{
    pub fn new(backend: B, synchronizer: FeedSynchronizer<V, P>) -> Self {
        Self {
            backend: Arc::new(backend),
            sync: Arc::new(Mutex::new(synchronizer)),
        }
    }

    /// Fetch up to `page_size` comments and display them unless a newer
    /// request overtakes this one.
    pub async fn refresh(&self, page_size: u32) -> Result<Completion, FeedError> {
        let ticket = self.lock().begin_refresh(page_size);

        let backend = Arc::clone(&self.backend);
        let result = tokio::task::spawn_blocking(move || backend.fetch_comments(page_size))
            .await
            .map_err(|e| FeedError::Task(e.to_string()))?;

        self.lock().complete_refresh(ticket, result)
    }

    /// Refresh with the page size from the view's control, falling back to
    /// the persisted preference and then `default`.
    pub async fn refresh_from_control(&self, default: u32) -> Result<Completion, FeedError> {
        let page_size = self.lock().requested_page_size(default);
        self.refresh(page_size).await
    }

    /// Delete every comment on the backend and clear the display.
    pub async fn delete_all(&self) -> Result<Completion, FeedError> {
        let ticket = self.lock().begin_delete_all();

        let backend = Arc::clone(&self.backend);
        let result = tokio::task::spawn_blocking(move || backend.delete_all_comments())
            .await
            .map_err(|e| FeedError::Task(e.to_string()))?;

        self.lock().complete_delete_all(ticket, result)
    }

    /// Run `f` with exclusive access to the synchronizer.
    ///
    /// Keep `f` short; in-flight requests wait for it before completing.
    pub fn with_synchronizer<R>(&self, f: impl FnOnce(&mut FeedSynchronizer<V, P>) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, FeedSynchronizer<V, P>> {
        // Mutations under the lock are single assignments or clears, so a
        // poisoned lock still guards a consistent list.
        self.sync.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
