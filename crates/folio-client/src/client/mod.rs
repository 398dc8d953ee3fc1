//! Portfolio backend REST client.
//!
//! Provides a sync HTTP client over a shared `ureq` agent. Callers that need
//! non-blocking behavior run these methods on a blocking thread pool.

mod auth;
mod comments;
mod upload;

use std::time::Duration;

use ureq::Agent;
use ureq::http::Response;

use crate::error::ClientError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Portfolio backend client.
pub struct FeedClient {
    agent: Agent,
    base_url: String,
}

impl FeedClient {
    /// Create a client for `base_url` with the default timeout.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Create a client for `base_url` with an explicit timeout applied to
    /// every request.
    #[must_use]
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a backend endpoint.
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Resolve a URL handed out by the backend.
    ///
    /// The development server returns upload targets as host-relative paths,
    /// production returns absolute URLs.
    fn resolve(&self, target: &str) -> Result<String, ClientError> {
        if target.starts_with("http://") || target.starts_with("https://") {
            Ok(target.to_owned())
        } else if target.starts_with('/') {
            Ok(self.endpoint(target))
        } else {
            Err(ClientError::InvalidUrl(target.to_owned()))
        }
    }
}

/// Read the body of a successful response as text.
///
/// Any status >= 400 becomes [`ClientError::HttpResponse`] carrying the body.
fn read_success_body(response: Response<ureq::Body>) -> Result<String, ClientError> {
    let status = response.status().as_u16();
    let mut body_reader = response.into_body();

    if status >= 400 {
        let error_body = body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(ClientError::HttpResponse {
            status,
            body: error_body,
        });
    }

    Ok(body_reader.read_to_string()?)
}
