//! Comment feed for the portfolio site.
//!
//! Keeps a displayed list of comments in step with the backend's `/data`
//! endpoint:
//!
//! - [`FeedSynchronizer`]: owns the displayed entries and the persisted page
//!   size, discards stale responses via [`RequestTicket`]s
//! - [`FeedController`]: async wrapper running backend calls off the caller's
//!   thread
//! - [`FeedView`]: rendering interface supplied by the application
//! - [`CommentEntry`]: one rendered comment with a collapsible detail panel
//!
//! # Example
//!
//! ```ignore
//! use folio_client::FeedClient;
//! use folio_feed::{FeedSynchronizer, MemoryView};
//! use folio_prefs::MemoryPreferences;
//!
//! let client = FeedClient::new("http://localhost:8080");
//! let mut feed = FeedSynchronizer::new(MemoryView::new(), MemoryPreferences::new());
//! let page_size = feed.load_preferred_page_size(10);
//! feed.refresh(&client, page_size)?;
//! feed.toggle(0)?;
//! ```

mod controller;
mod entry;
mod error;
mod preference;
mod sequence;
mod sync;
mod view;

pub use controller::FeedController;
pub use entry::{CommentEntry, EntryDetail, EntryPart, EntryState, render};
pub use error::FeedError;
pub use preference::{PAGE_SIZE_KEY, load_page_size, store_page_size};
pub use sequence::RequestTicket;
pub use sync::{Completion, FeedSynchronizer};
pub use view::{FeedView, MemoryView};
