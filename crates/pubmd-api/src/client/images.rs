//! Image upload for the content API.

use pubmd_article::Image;

use super::ArticleClient;
use crate::error::ApiError;
use crate::transport::{ApiResponse, Method, Transport};

impl<T: Transport> ArticleClient<T> {
    /// Attach image data at an upload target returned by the API.
    pub fn upload_image(&self, upload_url: &str, image: &Image) -> Result<ApiResponse, ApiError> {
        self.send_json(Method::Patch, self.resolve_url(upload_url), image)?
            .error_for_status()
    }
}
