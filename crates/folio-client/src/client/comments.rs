//! Comment feed operations.

use tracing::info;

use super::{FeedClient, read_success_body};
use crate::error::ClientError;
use crate::types::Comment;

impl FeedClient {
    /// Fetch up to `limit` comments, in the order the backend returns them.
    pub fn fetch_comments(&self, limit: u32) -> Result<Vec<Comment>, ClientError> {
        let url = format!("{}?comment-amount={limit}", self.endpoint("/data"));

        info!("Fetching up to {} comments", limit);

        let response = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .call()?;

        let body = read_success_body(response)?;
        let comments: Vec<Comment> = serde_json::from_str(&body)?;
        info!("Received {} comments", comments.len());
        Ok(comments)
    }

    /// Delete every stored comment (and its uploaded image) on the backend.
    pub fn delete_all_comments(&self) -> Result<(), ClientError> {
        let url = self.endpoint("/data");

        info!("Deleting all comments");

        let response = self.agent.delete(&url).call()?;
        read_success_body(response)?;
        Ok(())
    }
}
