//! `folio comments` command implementations.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::Term;
use folio_client::{CommentBackend, ImageUpload, NewComment};
use folio_feed::{Completion, FeedController, FeedSynchronizer, FeedView, MemoryView};
use folio_prefs::PreferenceStore;

use super::{GlobalArgs, client_from_config, preferences_from_config};
use crate::error::CliError;
use crate::output::Output;
use crate::view::{Format, TerminalView};

/// Comment feed subcommands.
#[derive(Subcommand)]
pub(crate) enum CommentsCommand {
    /// Fetch and show the newest comments.
    List(ListArgs),
    /// Delete every comment on the backend.
    DeleteAll(DeleteAllArgs),
    /// Submit a new comment.
    Post(PostArgs),
}

impl CommentsCommand {
    /// Execute the comments subcommand.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        match self {
            Self::List(args) => runtime()?.block_on(args.execute(global)),
            Self::DeleteAll(args) => runtime()?.block_on(args.execute(global)),
            Self::Post(args) => args.execute(global),
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    Ok(tokio::runtime::Runtime::new()?)
}

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Number of comments to request (default: stored preference).
    #[arg(short = 'n', long)]
    page_size: Option<u32>,

    /// Show the detail panel of entry N (1-based, repeatable).
    #[arg(short, long, value_name = "N")]
    expand: Vec<usize>,

    /// Print entries as HTML fragments.
    #[arg(long)]
    html: bool,
}

impl ListArgs {
    async fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = global.load_config()?;

        let format = if self.html { Format::Html } else { Format::Text };
        let synchronizer = FeedSynchronizer::new(
            TerminalView::new(Term::stdout(), format),
            preferences_from_config(&config),
        );
        let controller = FeedController::new(client_from_config(&config), synchronizer);

        let (shown, page_size) = list_feed(
            &controller,
            self.page_size,
            &self.expand,
            config.feed.default_page_size,
        )
        .await?;

        controller.with_synchronizer(|s| s.view().present())?;
        output.listed(shown, page_size);
        Ok(())
    }
}

/// Refresh the feed and expand the requested entries.
///
/// Without an explicit page size the stored preference is used, falling back
/// to `default_page_size`. Returns the number of displayed entries and the
/// page size that was requested.
async fn list_feed<B, V, P>(
    controller: &FeedController<B, V, P>,
    page_size: Option<u32>,
    expand: &[usize],
    default_page_size: u32,
) -> Result<(usize, u32), CliError>
where
    B: CommentBackend + 'static,
    V: FeedView + 'static,
    P: PreferenceStore + 'static,
{
    let page_size = match page_size {
        Some(size) => size,
        None => controller.with_synchronizer(|s| s.load_preferred_page_size(default_page_size)),
    };
    tracing::debug!(page_size, "listing comments");

    let shown = match controller.refresh(page_size).await? {
        Completion::Applied { entries } => entries,
        Completion::Superseded { .. } => controller.with_synchronizer(|s| s.entries().len()),
    };

    for &position in expand {
        let index = position
            .checked_sub(1)
            .ok_or_else(|| CliError::Validation("entries are numbered from 1".to_owned()))?;
        controller.with_synchronizer(|s| s.toggle(index))?;
    }

    Ok((shown, page_size))
}

/// Arguments for the delete-all command.
#[derive(Args)]
pub(crate) struct DeleteAllArgs {
    /// Confirm deletion of every comment.
    #[arg(long)]
    yes: bool,
}

impl DeleteAllArgs {
    async fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        if !self.yes {
            return Err(CliError::Validation(
                "refusing to delete all comments without --yes".to_owned(),
            ));
        }

        let output = Output::new();
        let config = global.load_config()?;
        let controller = FeedController::new(
            client_from_config(&config),
            FeedSynchronizer::new(MemoryView::new(), preferences_from_config(&config)),
        );

        controller.delete_all().await?;
        output.deleted();
        Ok(())
    }
}

/// Arguments for the post command.
#[derive(Args)]
pub(crate) struct PostArgs {
    /// Comment body.
    #[arg(long)]
    text: String,

    /// Optional headline.
    #[arg(long)]
    title: Option<String>,

    /// Image file to attach.
    #[arg(long)]
    image: Option<PathBuf>,
}

impl PostArgs {
    fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let comment = self.into_comment()?;

        let config = global.load_config()?;
        client_from_config(&config).post_comment(&comment)?;

        output.posted(&comment);
        Ok(())
    }

    fn into_comment(self) -> Result<NewComment, CliError> {
        if self.text.trim().is_empty() {
            return Err(CliError::Validation("comment text cannot be empty".to_owned()));
        }
        if let Some(path) = &self.image
            && !path.is_file()
        {
            return Err(CliError::Validation(format!(
                "image not found: {}",
                path.display()
            )));
        }

        Ok(NewComment {
            title: self.title.filter(|t| !t.trim().is_empty()),
            text: self.text,
            image: self.image.map(ImageUpload::from_path),
        })
    }
}
