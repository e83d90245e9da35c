//! HTTP transport seam.
//!
//! Everything the client sends goes through [`Transport::send`], so tests
//! can swap the network for [`MockTransport`].

mod agent;
#[cfg(any(test, feature = "mock"))]
mod mock;

use std::fmt;

pub use agent::UreqTransport;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;

use crate::error::ApiError;

/// HTTP method used by the content API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
            Self::Patch => f.write_str("PATCH"),
        }
    }
}

/// Outgoing request. The body, when present, is JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Value of the `Authorization` header.
    pub authorization: Option<String>,
    pub body: Option<Vec<u8>>,
}

/// Response status and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn an error status into [`ApiError::HttpResponse`].
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::HttpResponse {
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// Sends requests to the content API.
///
/// Implementations report any received response as `Ok`, whatever its
/// status. `Err` means no response was received.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        (**self).send(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        let ok = ApiResponse {
            status: 201,
            body: String::new(),
        };
        assert!(ok.is_success());

        let redirect = ApiResponse {
            status: 302,
            body: String::new(),
        };
        assert!(!redirect.is_success());
    }

    #[test]
    fn test_error_for_status() {
        let response = ApiResponse {
            status: 401,
            body: "Invalid credentials".to_owned(),
        };
        match response.error_for_status() {
            Err(ApiError::HttpResponse { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "Invalid credentials");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }
}
