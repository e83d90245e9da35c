//! Publish error types.

use crate::error::ApiError;

/// Fatal error during a publish run.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The remote listing could not be fetched or parsed.
    #[error("Article lookup failed: {0}")]
    Lookup(#[source] ApiError),

    /// A remote article matched by title but carries no ID.
    #[error("Existing article '{title}' has no id, cannot update it")]
    MissingRemoteId { title: String },

    /// The create or update call failed.
    #[error("Publishing article failed: {0}")]
    Api(#[from] ApiError),
}
