//! Login status lookup.

use tracing::info;

use super::{FeedClient, read_success_body};
use crate::error::ClientError;
use crate::types::LoginStatus;

impl FeedClient {
    /// Ask the backend who is logged in.
    pub fn login_status(&self) -> Result<LoginStatus, ClientError> {
        let url = self.endpoint("/auth");

        let response = self.agent.get(&url).call()?;
        let body = read_success_body(response)?;
        let status = LoginStatus::parse(&body);

        match status.email() {
            Some(email) => info!("Logged in as {}", email),
            None => info!("Not logged in"),
        }
        Ok(status)
    }
}
