//! Comment feed synchronizer.
//!
//! [`FeedSynchronizer`] owns the displayed comment list and the page-size
//! preference, and mirrors both into a [`FeedView`]. Backend calls are split
//! into a `begin_*` step that issues a [`RequestTicket`] and a `complete_*`
//! step that applies the outcome, so callers can run the request anywhere
//! (inline, on a thread pool) while stale results are still discarded.
//!
//! Invariant: the displayed list equals the contents of the most recently
//! applied fetch, in backend order, or is empty after a clear or delete.

use folio_client::{ClientError, Comment, CommentBackend};
use folio_prefs::PreferenceStore;
use tracing::{debug, info, warn};

use crate::entry::{CommentEntry, EntryState, render};
use crate::error::FeedError;
use crate::preference::{load_page_size, store_page_size};
use crate::sequence::{RequestSequence, RequestTicket};
use crate::view::FeedView;

/// What happened to a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result was applied; `entries` are now displayed.
    Applied {
        /// Number of displayed entries afterwards.
        entries: usize,
    },
    /// A newer request was issued meanwhile; the result was dropped.
    Superseded {
        /// Ticket of the dropped request.
        ticket: RequestTicket,
        /// Ticket that superseded it.
        latest: RequestTicket,
    },
}

/// Keeps the displayed comment list in sync with the backend.
pub struct FeedSynchronizer<V, P> {
    view: V,
    prefs: P,
    entries: Vec<CommentEntry>,
    sequence: RequestSequence,
}

impl<V: FeedView, P: PreferenceStore> FeedSynchronizer<V, P> {
    /// Create a synchronizer with nothing displayed.
    pub fn new(view: V, prefs: P) -> Self {
        Self {
            view,
            prefs,
            entries: Vec::new(),
            sequence: RequestSequence::default(),
        }
    }

    /// Read the persisted page size (or `default`) and seed the view's
    /// page-size control with it.
    pub fn load_preferred_page_size(&mut self, default: u32) -> u32 {
        let page_size = load_page_size(&self.prefs, default);
        self.view.set_page_size_control(page_size);
        page_size
    }

    /// Page size for the next refresh: the control's value if the user set
    /// one, otherwise the persisted preference or `default`.
    pub fn requested_page_size(&self, default: u32) -> u32 {
        self.view
            .page_size_control()
            .unwrap_or_else(|| load_page_size(&self.prefs, default))
    }

    /// Start a refresh: persist `page_size` and issue a ticket.
    ///
    /// The displayed list is left alone until the response is applied, so a
    /// failed fetch never blanks the feed.
    pub fn begin_refresh(&mut self, page_size: u32) -> RequestTicket {
        store_page_size(&self.prefs, page_size);
        self.view.set_page_size_control(page_size);

        let ticket = self.sequence.issue();
        debug!(%ticket, page_size, "refresh issued");
        ticket
    }

    /// Apply the outcome of the refresh holding `ticket`.
    ///
    /// A successful response replaces the displayed list. A response for a
    /// superseded ticket is dropped whether it succeeded or not. A failure
    /// for the current ticket leaves the list untouched and is returned.
    pub fn complete_refresh(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<Comment>, ClientError>,
    ) -> Result<Completion, FeedError> {
        if let Some(superseded) = self.superseded(ticket) {
            if let Err(e) = &result {
                debug!(%ticket, "stale refresh failed: {e}");
            }
            return Ok(superseded);
        }

        let comments = result.inspect_err(|e| warn!(%ticket, "refresh failed: {e}"))?;

        self.clear();
        self.entries = comments.iter().map(render).collect();
        self.view.render_entries(&self.entries);

        info!(%ticket, "displaying {} comments", self.entries.len());
        Ok(Completion::Applied {
            entries: self.entries.len(),
        })
    }

    /// Refresh against a blocking backend in one step.
    pub fn refresh(
        &mut self,
        backend: &impl CommentBackend,
        page_size: u32,
    ) -> Result<Completion, FeedError> {
        let ticket = self.begin_refresh(page_size);
        let result = backend.fetch_comments(page_size);
        self.complete_refresh(ticket, result)
    }

    /// Start a delete-all and issue a ticket.
    ///
    /// The ticket also supersedes every refresh still in flight.
    pub fn begin_delete_all(&mut self) -> RequestTicket {
        let ticket = self.sequence.issue();
        debug!(%ticket, "delete-all issued");
        ticket
    }

    /// Apply the outcome of the delete holding `ticket`.
    ///
    /// Failures are always returned, even for a superseded ticket, because
    /// the comments are still on the backend. A successful delete clears the
    /// list unless a newer request has been issued since.
    pub fn complete_delete_all(
        &mut self,
        ticket: RequestTicket,
        result: Result<(), ClientError>,
    ) -> Result<Completion, FeedError> {
        result.inspect_err(|e| warn!(%ticket, "delete-all failed: {e}"))?;

        if let Some(superseded) = self.superseded(ticket) {
            return Ok(superseded);
        }

        self.clear();
        info!(%ticket, "all comments deleted");
        Ok(Completion::Applied { entries: 0 })
    }

    /// Delete all comments against a blocking backend in one step.
    pub fn delete_all(&mut self, backend: &impl CommentBackend) -> Result<Completion, FeedError> {
        let ticket = self.begin_delete_all();
        let result = backend.delete_all_comments();
        self.complete_delete_all(ticket, result)
    }

    /// Remove every displayed entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.view.clear_entries();
    }

    /// Toggle the entry at `index` and return its new state.
    pub fn toggle(&mut self, index: usize) -> Result<EntryState, FeedError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(FeedError::EntryOutOfRange { index, len })?;

        let state = entry.toggle();
        self.view.update_entry(index, entry);
        Ok(state)
    }

    /// Displayed entries in backend order.
    pub fn entries(&self) -> &[CommentEntry] {
        &self.entries
    }

    /// The view being driven.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view, for feeding user input into it.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn superseded(&self, ticket: RequestTicket) -> Option<Completion> {
        if self.sequence.is_latest(ticket) {
            return None;
        }
        let latest = self.sequence.latest()?;
        warn!(%ticket, %latest, "discarding stale response");
        Some(Completion::Superseded { ticket, latest })
    }
}

#[cfg(test)]
mod tests {
    use folio_client::MockBackend;
    use folio_prefs::MemoryPreferences;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::preference::PAGE_SIZE_KEY;
    use crate::view::MemoryView;

    fn synchronizer() -> FeedSynchronizer<MemoryView, MemoryPreferences> {
        FeedSynchronizer::new(MemoryView::new(), MemoryPreferences::new())
    }

    fn comments(texts: &[&str]) -> Vec<Comment> {
        texts.iter().map(|t| Comment::new(*t, "today")).collect()
    }

    fn summaries(entries: &[CommentEntry]) -> Vec<&str> {
        entries.iter().map(CommentEntry::summary).collect()
    }

    #[test]
    fn test_refresh_renders_in_backend_order() {
        let backend = MockBackend::new().with_comments(comments(&["c", "b", "a"]));
        let mut sync = synchronizer();

        let completion = sync.refresh(&backend, 5).unwrap();

        assert_eq!(completion, Completion::Applied { entries: 3 });
        assert_eq!(
            summaries(sync.entries()),
            vec!["c posted on: today", "b posted on: today", "a posted on: today"]
        );
        assert_eq!(sync.view().entries(), sync.entries());
        assert_eq!(backend.fetch_limits(), vec![5]);
    }

    #[test]
    fn test_refresh_count_matches_response_for_any_page_size() {
        let backend = MockBackend::new().with_comments(comments(&["a", "b", "c", "d"]));

        for page_size in [0, 1, 3, 4, 10] {
            let mut sync = synchronizer();
            sync.refresh(&backend, page_size).unwrap();

            let expected = backend.fetch_comments(page_size).unwrap().len();
            assert_eq!(sync.entries().len(), expected, "page size {page_size}");
        }
    }

    #[test]
    fn test_refresh_replaces_previous_entries() {
        let backend = MockBackend::new().with_comments(comments(&["a", "b", "c"]));
        let mut sync = synchronizer();

        sync.refresh(&backend, 3).unwrap();
        sync.refresh(&backend, 1).unwrap();

        assert_eq!(summaries(sync.entries()), vec!["a posted on: today"]);
    }

    #[test]
    fn test_refresh_persists_page_size() {
        let backend = MockBackend::new();
        let mut sync = synchronizer();

        sync.refresh(&backend, 7).unwrap();

        assert_eq!(sync.load_preferred_page_size(10), 7);
        assert_eq!(sync.view().page_size_control(), Some(7));
    }

    #[test]
    fn test_load_preferred_page_size_seeds_control() {
        let prefs = MemoryPreferences::new().with_value(PAGE_SIZE_KEY, "12");
        let mut sync = FeedSynchronizer::new(MemoryView::new(), prefs);

        assert_eq!(sync.load_preferred_page_size(10), 12);
        assert_eq!(sync.view().page_size_control(), Some(12));
    }

    #[test]
    fn test_requested_page_size_prefers_control() {
        let prefs = MemoryPreferences::new().with_value(PAGE_SIZE_KEY, "12");
        let mut sync = FeedSynchronizer::new(MemoryView::new(), prefs);
        assert_eq!(sync.requested_page_size(10), 12);

        sync.view_mut().type_page_size(3);
        assert_eq!(sync.requested_page_size(10), 3);
    }

    #[test]
    fn test_refresh_failure_keeps_entries() {
        let backend = MockBackend::new()
            .with_comments(comments(&["a", "b"]))
            .with_fetch_failure(500);
        let mut sync = synchronizer();
        let ticket = sync.begin_refresh(2);
        sync.complete_refresh(ticket, Ok(comments(&["kept"]))).unwrap();

        let err = sync.refresh(&backend, 2).unwrap_err();

        assert!(matches!(err, FeedError::Backend(ClientError::HttpResponse { status: 500, .. })));
        assert_eq!(summaries(sync.entries()), vec!["kept posted on: today"]);
    }

    #[test]
    fn test_refresh_malformed_response_is_parse_error() {
        let backend = MockBackend::new().with_malformed_fetch();
        let mut sync = synchronizer();

        let err = sync.refresh(&backend, 2).unwrap_err();

        assert!(matches!(err, FeedError::Backend(ClientError::ResponseParse(_))));
        assert!(sync.entries().is_empty());

        // The next attempt works normally.
        assert_eq!(
            sync.refresh(&backend, 2).unwrap(),
            Completion::Applied { entries: 0 }
        );
    }

    #[test]
    fn test_stale_refresh_is_discarded() {
        let mut sync = synchronizer();
        let older = sync.begin_refresh(1);
        let newer = sync.begin_refresh(2);

        let applied = sync.complete_refresh(newer, Ok(comments(&["new1", "new2"])));
        let stale = sync.complete_refresh(older, Ok(comments(&["old"])));

        assert_eq!(applied.unwrap(), Completion::Applied { entries: 2 });
        assert_eq!(
            stale.unwrap(),
            Completion::Superseded {
                ticket: older,
                latest: newer
            }
        );
        assert_eq!(
            summaries(sync.entries()),
            vec!["new1 posted on: today", "new2 posted on: today"]
        );
        assert_eq!(sync.view().render_count(), 1);
    }

    #[test]
    fn test_stale_refresh_failure_is_not_reported() {
        let mut sync = synchronizer();
        let older = sync.begin_refresh(1);
        let _newer = sync.begin_refresh(2);

        let result = sync.complete_refresh(
            older,
            Err(ClientError::HttpResponse {
                status: 502,
                body: String::new(),
            }),
        );

        assert!(matches!(result, Ok(Completion::Superseded { .. })));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let backend = MockBackend::new().with_comments(comments(&["a", "b"]));
        let mut sync = synchronizer();
        sync.refresh(&backend, 5).unwrap();

        sync.clear();
        assert!(sync.entries().is_empty());
        assert!(sync.view().entries().is_empty());

        sync.clear();
        assert!(sync.entries().is_empty());
    }

    #[test]
    fn test_delete_all_clears_entries() {
        let backend = MockBackend::new().with_comments(comments(&["a", "b"]));
        let mut sync = synchronizer();
        sync.refresh(&backend, 5).unwrap();

        let completion = sync.delete_all(&backend).unwrap();

        assert_eq!(completion, Completion::Applied { entries: 0 });
        assert!(sync.entries().is_empty());
        assert!(sync.view().entries().is_empty());
        assert!(backend.comments().is_empty());
    }

    #[test]
    fn test_delete_all_failure_keeps_entries() {
        let backend = MockBackend::new()
            .with_comments(comments(&["a", "b"]))
            .with_delete_failure(500);
        let mut sync = synchronizer();
        sync.refresh(&backend, 5).unwrap();

        let err = sync.delete_all(&backend).unwrap_err();

        assert!(matches!(err, FeedError::Backend(_)));
        assert_eq!(sync.entries().len(), 2);
        assert_eq!(sync.view().entries().len(), 2);
    }

    #[test]
    fn test_delete_supersedes_in_flight_refresh() {
        let mut sync = synchronizer();
        let refresh = sync.begin_refresh(5);
        let delete = sync.begin_delete_all();

        sync.complete_delete_all(delete, Ok(())).unwrap();
        let late = sync.complete_refresh(refresh, Ok(comments(&["ghost"]))).unwrap();

        assert!(matches!(late, Completion::Superseded { .. }));
        assert!(sync.entries().is_empty());
    }

    #[test]
    fn test_refresh_after_delete_wins() {
        let mut sync = synchronizer();
        let delete = sync.begin_delete_all();
        let refresh = sync.begin_refresh(5);

        sync.complete_refresh(refresh, Ok(comments(&["fresh"]))).unwrap();
        let late_delete = sync.complete_delete_all(delete, Ok(())).unwrap();

        assert!(matches!(late_delete, Completion::Superseded { .. }));
        assert_eq!(summaries(sync.entries()), vec!["fresh posted on: today"]);
    }

    #[test]
    fn test_stale_delete_failure_is_reported() {
        let mut sync = synchronizer();
        let delete = sync.begin_delete_all();
        let _refresh = sync.begin_refresh(5);

        let result = sync.complete_delete_all(
            delete,
            Err(ClientError::HttpResponse {
                status: 500,
                body: String::new(),
            }),
        );

        assert!(matches!(result, Err(FeedError::Backend(_))));
    }

    #[test]
    fn test_toggle_updates_entry_and_view() {
        let backend = MockBackend::new().with_comments(comments(&["a", "b"]));
        let mut sync = synchronizer();
        sync.refresh(&backend, 5).unwrap();

        assert_eq!(sync.toggle(1).unwrap(), EntryState::Expanded);
        assert_eq!(sync.entries()[0].state(), EntryState::Collapsed);
        assert_eq!(sync.entries()[1].state(), EntryState::Expanded);
        assert_eq!(sync.view().entries()[1].state(), EntryState::Expanded);

        assert_eq!(sync.toggle(1).unwrap(), EntryState::Collapsed);
        assert_eq!(sync.view().entries()[1].state(), EntryState::Collapsed);
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut sync = synchronizer();

        let err = sync.toggle(0).unwrap_err();

        assert!(matches!(err, FeedError::EntryOutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn test_single_comment_scenario() {
        let backend = MockBackend::new()
            .with_comment(Comment::new("hi", "1/2/2020").with_title("T"));
        let mut sync = synchronizer();

        sync.refresh(&backend, 5).unwrap();

        assert_eq!(sync.entries().len(), 1);
        let entry = &sync.entries()[0];
        assert_eq!(entry.summary(), "hi posted on: 1/2/2020");
        assert_eq!(entry.state(), EntryState::Collapsed);

        sync.toggle(0).unwrap();
        let detail = sync.entries()[0].visible_detail().unwrap();
        assert_eq!(detail.title.as_deref(), Some("T"));
        assert_eq!(detail.text, "hi");
    }
}
