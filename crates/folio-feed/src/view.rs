//! The rendering surface the synchronizer drives.

use crate::entry::CommentEntry;

/// Rendering interface supplied by the surrounding application.
///
/// The synchronizer owns the entry list; a view only mirrors it.
pub trait FeedView: Send {
    /// Show `entries` in order, replacing whatever was shown before.
    fn render_entries(&mut self, entries: &[CommentEntry]);

    /// Remove every shown entry.
    fn clear_entries(&mut self);

    /// Re-draw the entry at `index` after its state changed.
    fn update_entry(&mut self, index: usize, entry: &CommentEntry);

    /// Current value of the page-size control, if the user has set one.
    fn page_size_control(&self) -> Option<u32>;

    /// Put `page_size` into the page-size control.
    fn set_page_size_control(&mut self, page_size: u32);
}

/// Headless [`FeedView`] that records what it was asked to show.
#[derive(Debug, Default)]
pub struct MemoryView {
    entries: Vec<CommentEntry>,
    page_size: Option<u32>,
    renders: usize,
}

impl MemoryView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries currently shown.
    #[must_use]
    pub fn entries(&self) -> &[CommentEntry] {
        &self.entries
    }

    /// Number of full renders so far.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Simulate the user typing into the page-size control.
    pub fn type_page_size(&mut self, page_size: u32) {
        self.page_size = Some(page_size);
    }
}

impl FeedView for MemoryView {
    fn render_entries(&mut self, entries: &[CommentEntry]) {
        self.entries = entries.to_vec();
        self.renders += 1;
    }

    fn clear_entries(&mut self) {
        self.entries.clear();
    }

    fn update_entry(&mut self, index: usize, entry: &CommentEntry) {
        if let Some(slot) = self.entries.get_mut(index) {
            *slot = entry.clone();
        }
    }

    fn page_size_control(&self) -> Option<u32> {
        self.page_size
    }

    fn set_page_size_control(&mut self, page_size: u32) {
        self.page_size = Some(page_size);
    }
}
