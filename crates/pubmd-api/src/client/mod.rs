//! Content API client.
//!
//! Provides a sync client for the article endpoints with HTTP basic
//! authentication.

mod articles;
mod images;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use pubmd_config::ApiConfig;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport, UreqTransport};

/// Content API client.
pub struct ArticleClient<T = UreqTransport> {
    transport: T,
    base_url: String,
    endpoint: String,
    get_endpoint: String,
    auth_header: String,
    authenticate_lookup: bool,
}

impl ArticleClient<UreqTransport> {
    /// Create a client that talks to the network.
    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> ArticleClient<T> {
    /// Create a client over the given transport.
    ///
    /// Credentials are not validated; empty values still produce a header.
    pub fn with_transport(config: &ApiConfig, transport: T) -> Self {
        Self {
            transport,
            base_url: config.base_url(),
            endpoint: config.endpoint.trim_matches('/').to_owned(),
            get_endpoint: config.get_endpoint.trim_matches('/').to_owned(),
            auth_header: basic_auth_header(&config.username, &config.password),
            authenticate_lookup: config.authenticate_lookup,
        }
    }

    /// Base URL, e.g. `https://blog.example.com`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the article listing.
    fn list_url(&self) -> String {
        format!("{}/{}", self.base_url, self.get_endpoint)
    }

    /// URL for creating an article.
    fn create_url(&self) -> String {
        format!("{}/{}", self.base_url, self.endpoint)
    }

    /// URL for updating the article with the given ID.
    fn update_url(&self, id: u64) -> String {
        format!("{}/{}/{}/", self.base_url, self.endpoint, id)
    }

    /// Absolute URL for an upload target.
    ///
    /// Absolute URLs pass through; anything else is joined to the base URL.
    fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_owned()
        } else {
            format!("{}/{}", self.base_url, url.trim_start_matches('/'))
        }
    }

    /// Send a request and return the response, whatever its status.
    fn execute(
        &self,
        method: Method,
        url: String,
        body: Option<Vec<u8>>,
        authenticate: bool,
    ) -> Result<ApiResponse, ApiError> {
        info!("Sending {method} request to {url}");
        if let Some(body) = &body {
            debug!(body = %String::from_utf8_lossy(body), "Request body");
        }

        let request = ApiRequest {
            method,
            url,
            authorization: authenticate.then(|| self.auth_header.clone()),
            body,
        };
        self.transport.send(&request)
    }

    /// Send a JSON body with credentials attached.
    fn send_json<B: Serialize>(
        &self,
        method: Method,
        url: String,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        let payload = serde_json::to_vec(body)?;
        self.execute(method, url, Some(payload), true)
    }
}

/// `Authorization` header value for HTTP basic authentication.
#[must_use]
pub fn basic_auth_header(username: &str, password: &str) -> String {
    let credentials = BASE64_STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {credentials}")
}


#[cfg(test)]
mod tests {
    use super::test_support::api_config;
    use super::*;
    use crate::transport::MockTransport;

    #[test]
    fn test_basic_auth_header() {
        assert_eq!(
            basic_auth_header("editor", "secret"),
            "Basic ZWRpdG9yOnNlY3JldA=="
        );
    }

    #[test]
    fn test_basic_auth_header_empty_credentials() {
        // ":" encoded
        assert_eq!(basic_auth_header("", ""), "Basic Og==");
    }

    #[test]
    fn test_urls() {
        let client = ArticleClient::with_transport(&api_config(), MockTransport::new());
        assert_eq!(client.base_url(), "https://blog.example.com");
        assert_eq!(client.list_url(), "https://blog.example.com/api/articles/all");
        assert_eq!(client.create_url(), "https://blog.example.com/api/articles");
        assert_eq!(
            client.update_url(7),
            "https://blog.example.com/api/articles/7/"
        );
    }

    #[test]
    fn test_resolve_url() {
        let client = ArticleClient::with_transport(&api_config(), MockTransport::new());
        assert_eq!(
            client.resolve_url("https://cdn.example.com/upload/1"),
            "https://cdn.example.com/upload/1"
        );
        assert_eq!(
            client.resolve_url("/api/images/3/"),
            "https://blog.example.com/api/images/3/"
        );
    }
}
