//! Backend data types.

mod auth;
mod comment;

pub use auth::LoginStatus;
pub use comment::{Comment, ImageUpload, NewComment};
