//! Mock transport for testing.
//!
//! Provides [`MockTransport`] for exercising the publish flow without a
//! network.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::{ApiRequest, ApiResponse, Transport};
use crate::error::ApiError;

/// Queued outcome for the next request.
#[derive(Debug)]
enum Reply {
    Response(ApiResponse),
    Failure(String),
}

/// Mock transport that records requests and replays queued replies.
///
/// Replies are consumed in order. A request with no reply left fails as a
/// transport error.
///
/// # Example
///
/// ```ignore
/// use pubmd_api::{MockTransport, Transport};
///
/// let transport = MockTransport::new()
///     .with_response(200, "[]")
///     .with_response(201, r#"{"id": 1}"#);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    /// Create a mock with no queued replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_response(self, status: u16, body: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Response(ApiResponse {
                status,
                body: body.into(),
            }));
        self
    }

    /// Queue a transport failure (no response received).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Failure(message.into()));
        self
    }

    /// Requests received so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(message)) => Err(ApiError::Transport {
                url: request.url.clone(),
                message,
            }),
            None => Err(ApiError::Transport {
                url: request.url.clone(),
                message: "no mock reply queued".to_owned(),
            }),
        }
    }
}
