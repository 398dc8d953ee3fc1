//! Rendered comment entries.
//!
//! Each comment becomes a [`CommentEntry`]: a one-line summary and a detail
//! panel. The panel starts hidden; clicking either part flips it.

use folio_client::Comment;

/// Display state of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryState {
    /// Only the summary line is visible.
    #[default]
    Collapsed,
    /// The detail panel is visible too.
    Expanded,
}

impl EntryState {
    /// The other state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }
}

/// Clickable part of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPart {
    /// The summary line.
    Summary,
    /// The detail panel.
    Detail,
}

/// Content of the detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetail {
    /// Comment title, if any.
    pub title: Option<String>,
    /// Comment body.
    pub text: String,
    /// Attached image, if any.
    pub image_url: Option<String>,
}

/// One rendered comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEntry {
    summary: String,
    detail: EntryDetail,
    state: EntryState,
}

impl CommentEntry {
    /// Summary line, e.g. `hi posted on: 1/2/2020`.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Detail panel content, regardless of visibility.
    #[must_use]
    pub fn detail(&self) -> &EntryDetail {
        &self.detail
    }

    /// Detail panel content if the entry is expanded.
    #[must_use]
    pub fn visible_detail(&self) -> Option<&EntryDetail> {
        self.is_expanded().then_some(&self.detail)
    }

    /// Current display state.
    #[must_use]
    pub fn state(&self) -> EntryState {
        self.state
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.state == EntryState::Expanded
    }

    /// Flip between collapsed and expanded, returning the new state.
    pub fn toggle(&mut self) -> EntryState {
        self.state = self.state.toggled();
        self.state
    }

    /// Handle a click on either part of the entry.
    ///
    /// Both parts toggle; the distinction only matters to front ends that
    /// attach separate handlers.
    pub fn click(&mut self, _part: EntryPart) -> EntryState {
        self.toggle()
    }

    /// HTML fragment for the entry: an `<li>` holding the summary and a
    /// detail panel that carries `hidden` while collapsed.
    #[must_use]
    pub fn to_html(&self) -> String {
        let state = match self.state {
            EntryState::Collapsed => "collapsed",
            EntryState::Expanded => "expanded",
        };
        let hidden = if self.is_expanded() { "" } else { " hidden" };

        let mut html = format!(
            "<li class=\"comment-entry\" data-state=\"{state}\"><p class=\"comment-summary\">{}</p><div class=\"comment-detail\"{hidden}>",
            html_escape::encode_text(&self.summary)
        );
        if let Some(title) = &self.detail.title {
            html.push_str(&format!("<h3>{}</h3>", html_escape::encode_text(title)));
        }
        html.push_str(&format!("<p>{}</p>", html_escape::encode_text(&self.detail.text)));
        if let Some(url) = &self.detail.image_url {
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"comment image\">",
                html_escape::encode_double_quoted_attribute(url)
            ));
        }
        html.push_str("</div></li>");
        html
    }
}

/// Render one comment as a collapsed entry.
#[must_use]
pub fn render(comment: &Comment) -> CommentEntry {
    let headline = match &comment.title {
        Some(title) if comment.text.is_empty() => title.as_str(),
        _ => comment.text.as_str(),
    };
    let headline = headline.lines().next().unwrap_or_default();
    let mut summary = format!("{headline} posted on: {}", comment.posted_date_time);
    if let Some(email) = &comment.email {
        summary.push_str(" by ");
        summary.push_str(email);
    }

    CommentEntry {
        summary,
        detail: EntryDetail {
            title: comment.title.clone(),
            text: comment.text.clone(),
            image_url: comment.image_url.clone(),
        },
        state: EntryState::Collapsed,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_starts_collapsed() {
        let entry = render(&Comment::new("hi", "1/2/2020").with_title("T"));

        assert_eq!(entry.summary(), "hi posted on: 1/2/2020");
        assert_eq!(entry.state(), EntryState::Collapsed);
        assert_eq!(entry.visible_detail(), None);
    }

    #[test]
    fn test_toggle_is_two_state() {
        let mut entry = render(&Comment::new("hi", "1/2/2020").with_title("T"));

        assert_eq!(entry.toggle(), EntryState::Expanded);
        let detail = entry.visible_detail().unwrap();
        assert_eq!(detail.title.as_deref(), Some("T"));
        assert_eq!(detail.text, "hi");

        assert_eq!(entry.toggle(), EntryState::Collapsed);
        assert_eq!(entry.visible_detail(), None);
    }

    #[test]
    fn test_click_either_part_toggles() {
        let mut entry = render(&Comment::new("hi", "now"));

        assert_eq!(entry.click(EntryPart::Summary), EntryState::Expanded);
        assert_eq!(entry.click(EntryPart::Detail), EntryState::Collapsed);
    }

    #[test]
    fn test_summary_falls_back_to_title() {
        let entry = render(&Comment::new("", "Jun 11, 2020 11:18 AM").with_title("Just a title"));
        assert_eq!(entry.summary(), "Just a title posted on: Jun 11, 2020 11:18 AM");
    }

    #[test]
    fn test_summary_is_single_line() {
        let entry = render(&Comment::new("first line\nsecond line", "now").with_title("T"));

        assert_eq!(entry.summary(), "first line posted on: now");
        assert_eq!(entry.detail().text, "first line\nsecond line");
    }

    #[test]
    fn test_summary_includes_email() {
        let entry = render(&Comment::new("hey", "today").with_email("me@example.com"));
        assert_eq!(entry.summary(), "hey posted on: today by me@example.com");
    }

    #[test]
    fn test_to_html_collapsed_hides_detail() {
        let entry = render(&Comment::new("hi", "1/2/2020").with_title("T"));

        assert_eq!(
            entry.to_html(),
            "<li class=\"comment-entry\" data-state=\"collapsed\">\
             <p class=\"comment-summary\">hi posted on: 1/2/2020</p>\
             <div class=\"comment-detail\" hidden><h3>T</h3><p>hi</p></div></li>"
        );
    }

    #[test]
    fn test_to_html_expanded_with_image_escapes() {
        let mut entry = render(
            &Comment::new("<b>bold</b> & more", "now").with_image_url("/serve?a=1&b=\"2\""),
        );
        entry.toggle();

        let html = entry.to_html();
        assert!(html.contains("data-state=\"expanded\""));
        assert!(html.contains("<div class=\"comment-detail\">"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; &amp; more"));
        assert!(html.contains("src=\"/serve?a=1&amp;b=&quot;2&quot;\""));
    }
}
