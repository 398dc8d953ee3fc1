//! Comment submission through the upload form.

use rand::RngExt;
use tracing::info;

use super::{FeedClient, read_success_body};
use crate::error::ClientError;
use crate::types::NewComment;

impl FeedClient {
    /// Get a fresh form target for submitting a comment.
    ///
    /// Each URL is single-use; ask again for every submission.
    pub fn upload_url(&self) -> Result<String, ClientError> {
        let url = self.endpoint("/blobstore-upload-url");

        let response = self.agent.get(&url).call()?;
        let body = read_success_body(response)?;
        let target = body.trim();
        if target.is_empty() {
            return Err(ClientError::InvalidUrl(
                "backend returned an empty upload URL".to_owned(),
            ));
        }
        Ok(target.to_owned())
    }

    /// Submit a new comment, with an optional image.
    pub fn post_comment(&self, comment: &NewComment) -> Result<(), ClientError> {
        let target = self.upload_url()?;
        let url = self.resolve(&target)?;

        let image = match &comment.image {
            Some(image) => {
                let data = std::fs::read(&image.path)?;
                let filename = image
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "image".to_owned());
                Some(ImagePart {
                    filename,
                    content_type: &image.content_type,
                    data,
                })
            }
            None => None,
        };

        info!(
            "Posting comment ({} bytes of text, image: {})",
            comment.text.len(),
            image.is_some()
        );

        let boundary = format!("----FolioFormBoundary{:016x}", rand::rng().random::<u64>());
        let body = multipart_body(&boundary, comment, image.as_ref());

        let response = self
            .agent
            .post(&url)
            .header(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .send(&body[..])?;

        read_success_body(response)?;
        Ok(())
    }
}

struct ImagePart<'a> {
    filename: String,
    content_type: &'a str,
    data: Vec<u8>,
}

/// Build the `multipart/form-data` body the comment form would submit.
fn multipart_body(boundary: &str, comment: &NewComment, image: Option<&ImagePart<'_>>) -> Vec<u8> {
    let mut body = Vec::new();

    let mut text_field = |name: &str, value: &str| {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    };

    if let Some(title) = &comment.title {
        text_field("title", title);
    }
    text_field("text", &comment.text);

    if let Some(image) = image {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\n",
                quote_filename(&image.filename)
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", image.content_type).as_bytes());
        body.extend_from_slice(&image.data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

/// Percent-encode the characters that would end the quoted `filename`
/// parameter or the header line, the way browsers encode form filenames.
fn quote_filename(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '"' => quoted.push_str("%22"),
            '\r' => quoted.push_str("%0D"),
            '\n' => quoted.push_str("%0A"),
            _ => quoted.push(c),
        }
    }
    quoted
}
