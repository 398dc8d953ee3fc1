//! Error types for backend operations.

/// Error from backend API operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Response body was not the expected JSON shape.
    #[error("failed to parse response: {0}")]
    ResponseParse(#[from] serde_json::Error),

    /// I/O error (reading an image to upload).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL could not be built from the base URL or an upload target.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
