//! Status lines for feed commands.
//!
//! Feed content goes to stdout through the view; everything here goes to
//! stderr so `folio comments list --html > feed.html` stays clean.

use console::{Style, Term};
use folio_client::{LoginStatus, NewComment};

use crate::error::CliError;

/// How a status line is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Done,
    Notice,
    Failed,
}

/// Reports the outcome of feed commands on stderr.
pub(crate) struct Output {
    term: Term,
    done: Style,
    notice: Style,
    failed: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            done: Style::new().green(),
            notice: Style::new().yellow(),
            failed: Style::new().red().bold(),
        }
    }

    /// Report how many entries `comments list` displayed.
    pub(crate) fn listed(&self, shown: usize, page_size: u32) {
        let (tone, line) = listed_line(shown, page_size);
        self.write(tone, &line);
    }

    pub(crate) fn deleted(&self) {
        self.write(Tone::Done, "All comments deleted.");
    }

    pub(crate) fn posted(&self, comment: &NewComment) {
        self.write(Tone::Done, &posted_line(comment));
    }

    /// Report the login state; `description` carries the absolute links.
    pub(crate) fn login(&self, status: &LoginStatus, description: &str) {
        let tone = match status {
            LoginStatus::LoggedIn { .. } => Tone::Done,
            LoginStatus::LoggedOut { .. } => Tone::Notice,
        };
        self.write(tone, description);
    }

    pub(crate) fn failure(&self, err: &CliError) {
        self.write(Tone::Failed, &failure_line(err));
    }

    fn write(&self, tone: Tone, line: &str) {
        let style = match tone {
            Tone::Done => &self.done,
            Tone::Notice => &self.notice,
            Tone::Failed => &self.failed,
        };
        let _ = self.term.write_line(&style.apply_to(line).to_string());
    }
}

fn listed_line(shown: usize, page_size: u32) -> (Tone, String) {
    match shown {
        0 => (Tone::Notice, "No comments yet.".to_owned()),
        1 => (Tone::Done, format!("1 comment (page size {page_size})")),
        n => (Tone::Done, format!("{n} comments (page size {page_size})")),
    }
}

fn posted_line(comment: &NewComment) -> String {
    match (&comment.title, &comment.image) {
        (Some(title), Some(_)) => format!("Posted \"{title}\" with image."),
        (Some(title), None) => format!("Posted \"{title}\"."),
        (None, Some(_)) => "Comment posted with image.".to_owned(),
        (None, None) => "Comment posted.".to_owned(),
    }
}

fn failure_line(err: &CliError) -> String {
    match err {
        CliError::Validation(msg) => format!("Error: {msg} (see --help)"),
        other => format!("Error: {other}"),
    }
}
