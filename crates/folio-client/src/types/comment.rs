//! Comment types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A comment as returned by `GET /data`.
///
/// The backend serializes with Gson, which drops null fields, so every
/// optional field may be missing entirely.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment body.
    pub text: String,
    /// Optional headline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Display-ready timestamp, formatted by the backend.
    #[serde(default)]
    pub posted_date_time: String,
    /// Author email, present when the poster was logged in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Serving URL of an attached image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Comment {
    /// Create a comment with only the required fields set.
    #[must_use]
    pub fn new(text: impl Into<String>, posted_date_time: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: None,
            posted_date_time: posted_date_time.into(),
            email: None,
            image_url: None,
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the author email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// A comment to submit through the upload form.
#[derive(Debug, Clone, Default)]
pub struct NewComment {
    /// Optional headline (`title` form field).
    pub title: Option<String>,
    /// Comment body (`text` form field).
    pub text: String,
    /// Optional image (`image` form field).
    pub image: Option<ImageUpload>,
}

/// Image file attached to a [`NewComment`].
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Local file to upload.
    pub path: PathBuf,
    /// MIME type sent with the part.
    pub content_type: String,
}

impl ImageUpload {
    /// Guess the content type from the file extension.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let content_type = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("png") => "image/png",
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        };
        Self {
            path,
            content_type: content_type.to_owned(),
        }
    }
}
