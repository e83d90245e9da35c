//! Publish result types.

use pubmd_article::Article;
use serde::Deserialize;

use super::PublishAction;

/// Result of a publish run.
#[derive(Debug)]
pub struct PublishResult {
    /// Create or update.
    pub action: PublishAction,
    /// Status of the create/update response.
    pub status: u16,
    /// Raw create/update response body.
    pub response_body: String,
    /// Article ID from the response, or the updated identity.
    pub article_id: Option<u64>,
    /// Images successfully uploaded after the main call.
    pub images_uploaded: usize,
    /// Image uploads that failed.
    pub failed_uploads: Vec<UploadFailure>,
}

/// A failed image upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    /// Image file name (without extension).
    pub filename: String,
    /// Upload target.
    pub url: String,
    /// Error message.
    pub error: String,
}

/// Summary of what a dry run would send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunResult {
    /// Article title (lookup key).
    pub title: String,
    /// Content length in bytes.
    pub content_length: usize,
    /// Image file names, in payload order.
    pub image_names: Vec<String>,
    /// Images sent without data.
    pub pending_images: usize,
}

impl DryRunResult {
    /// Summarize an article payload.
    #[must_use]
    pub fn new(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            content_length: article.content.len(),
            image_names: article.images.iter().map(|i| i.filename.clone()).collect(),
            pending_images: article.pending_images(),
        }
    }
}

/// Create/update response, reduced to the fields the publisher reads.
///
/// Serde ignores unknown fields from the API response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PublishedArticle {
    #[serde(default)]
    pub(crate) id: Option<u64>,
    #[serde(default)]
    pub(crate) images: Vec<PublishedImage>,
}

/// Image entry in a create/update response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PublishedImage {
    /// Where to send the image data, when the API wants it separately.
    #[serde(default)]
    pub(crate) upload_url: Option<String>,
}

impl PublishedArticle {
    /// Parse a response body; `None` when it is not a JSON object.
    pub(crate) fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}
