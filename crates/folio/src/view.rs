//! Terminal rendering of the comment feed.

use console::{Style, Term};
use folio_feed::{CommentEntry, FeedView};

/// How entries are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Numbered summaries, indented detail for expanded entries.
    Text,
    /// One `<li>` fragment per entry.
    Html,
}

/// [`FeedView`] that mirrors the feed and writes it to a terminal on
/// [`present`](TerminalView::present).
///
/// Output is deferred because a terminal cannot redraw lines in place: the
/// caller applies every change first, then presents the final state once.
pub(crate) struct TerminalView {
    term: Term,
    format: Format,
    bold: Style,
    dim: Style,
    entries: Vec<CommentEntry>,
    page_size: Option<u32>,
}

impl TerminalView {
    pub(crate) fn new(term: Term, format: Format) -> Self {
        Self {
            term,
            format,
            bold: Style::new().bold(),
            dim: Style::new().dim(),
            entries: Vec::new(),
            page_size: None,
        }
    }

    /// Write every mirrored entry.
    pub(crate) fn present(&self) -> std::io::Result<()> {
        for (index, entry) in self.entries.iter().enumerate() {
            for line in self.lines(index, entry) {
                self.term.write_line(&line)?;
            }
        }
        Ok(())
    }

    /// Lines for one entry, numbered from 1.
    pub(crate) fn lines(&self, index: usize, entry: &CommentEntry) -> Vec<String> {
        if self.format == Format::Html {
            return vec![entry.to_html()];
        }

        let mut lines = vec![format!("{:>3}. {}", index + 1, entry.summary())];
        if let Some(detail) = entry.visible_detail() {
            if let Some(title) = &detail.title {
                lines.push(format!("     {}", self.bold.apply_to(title)));
            }
            for line in detail.text.lines() {
                lines.push(format!("     {line}"));
            }
            if let Some(url) = &detail.image_url {
                lines.push(format!("     {}", self.dim.apply_to(format!("[image] {url}"))));
            }
        }
        lines
    }
}

impl FeedView for TerminalView {
    fn render_entries(&mut self, entries: &[CommentEntry]) {
        self.entries = entries.to_vec();
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
