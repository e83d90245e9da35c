//! Error types for content API calls.

/// Error from content API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request could not be sent or no response was received.
    #[error("HTTP request to {url} failed: {message}")]
    Transport {
        /// Request URL.
        url: String,
        /// Transport error message.
        message: String,
    },

    /// Server returned an error status.
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
