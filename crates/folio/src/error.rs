//! CLI error types.

use folio_client::ClientError;
use folio_config::ConfigError;
use folio_feed::FeedError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("{0}")]
    Feed(#[from] FeedError),

    #[error("{0}")]
    Validation(String),
}
