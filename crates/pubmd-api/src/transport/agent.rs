//! Network transport backed by a `ureq` agent.

use std::time::Duration;

use ureq::{Agent, RequestBuilder};

use super::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::ApiError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Blocking HTTP transport.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Create a transport with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Create a transport with a custom global timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = request.url.as_str();
        let authorization = request.authorization.as_deref();
        let body = request.body.as_deref().unwrap_or_default();

        let result = match request.method {
            Method::Get => with_headers(self.agent.get(url), authorization).call(),
            Method::Post => with_headers(self.agent.post(url), authorization).send(body),
            Method::Patch => with_headers(self.agent.patch(url), authorization).send(body),
        };

        let response = result.map_err(|e| ApiError::Transport {
            url: url.to_owned(),
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let body = response
            .into_body()
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read response body)".to_owned());

        Ok(ApiResponse { status, body })
    }
}

/// Attach the JSON and auth headers every API call carries.
fn with_headers<B>(builder: RequestBuilder<B>, authorization: Option<&str>) -> RequestBuilder<B> {
    let builder = builder
        .header("Content-Type", "application/json")
        .header("Accept", "application/json");
    match authorization {
        Some(value) => builder.header("Authorization", value),
        None => builder,
    }
}
