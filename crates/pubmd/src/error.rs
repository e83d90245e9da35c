//! CLI error types.

use pubmd_api::PublishError;
use pubmd_article::{PayloadError, SourceError};
use pubmd_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    Payload(#[from] PayloadError),

    #[error("{0}")]
    Publish(#[from] PublishError),

    #[error("{0}")]
    Validation(String),
}
