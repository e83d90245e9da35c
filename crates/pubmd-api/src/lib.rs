//! Content API client and article publisher for pubmd.
//!
//! The crate is split along the calls the publish flow makes:
//!
//! - [`Transport`] is the HTTP seam. [`UreqTransport`] talks to the network;
//!   `MockTransport` (behind the `mock` feature) records requests in tests
//! - [`ArticleClient`] builds URLs, encodes JSON bodies and attaches basic
//!   auth
//! - [`find_existing`] matches the local title against the remote listing
//! - [`ArticlePublisher`] decides create vs. update and uploads images

mod client;
mod error;
mod lookup;
mod publisher;
mod transport;
mod types;

pub use client::{ArticleClient, basic_auth_header};
pub use error::ApiError;
pub use lookup::{find_by_title, find_existing};
pub use publisher::{
    ArticlePublisher, DryRunResult, PublishAction, PublishError, PublishResult, UploadFailure,
};
#[cfg(any(test, feature = "mock"))]
pub use transport::MockTransport;
pub use transport::{ApiRequest, ApiResponse, Method, Transport, UreqTransport};
pub use types::RemoteArticle;
