//! HTTP client for the portfolio comment backend.
//!
//! The backend exposes a handful of plain endpoints:
//!
//! - `GET /data?comment-amount={n}` - newest comments as a JSON array
//! - `DELETE /data` - remove every comment and uploaded image
//! - `GET /auth` - login status as text
//! - `GET /blobstore-upload-url` - one-shot form target for new comments
//!
//! [`FeedClient`] talks to them with a blocking `ureq` agent. The comment feed
//! itself only needs the [`CommentBackend`] trait, which the `mock` feature
//! also implements with an in-memory [`MockBackend`].

mod backend;
mod client;
mod error;
#[cfg(feature = "mock")]
mod mock;
mod types;

pub use backend::CommentBackend;
pub use client::FeedClient;
pub use error::ClientError;
#[cfg(feature = "mock")]
pub use mock::MockBackend;
pub use types::{Comment, ImageUpload, LoginStatus, NewComment};
