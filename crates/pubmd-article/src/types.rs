//! Article wire types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Image attached to an article.
///
/// `data` is `None` when the file could not be read or is not a supported
/// image. The API treats such images as pending upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Image {
    /// Source file name without extension.
    pub filename: String,
    /// Base64-encoded file contents.
    #[serde(default)]
    pub data: Option<String>,
}

impl Image {
    /// Image with no inline data.
    #[must_use]
    pub fn pending(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            data: None,
        }
    }

    /// Whether the image carries inline data.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

/// Article payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    /// Remote identity, present once the article exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Article title, the lookup key.
    pub title: String,
    /// Markdown body.
    #[serde(default)]
    pub content: String,
    /// Images in folder order.
    #[serde(default)]
    pub images: Vec<Image>,
    /// Source folder. Never sent over the wire.
    #[serde(skip)]
    pub path: PathBuf,
}

impl Article {
    /// Copy of this article carrying the given remote identity.
    #[must_use]
    pub fn with_id(&self, id: u64) -> Self {
        Self {
            id: Some(id),
            ..self.clone()
        }
    }

    /// Number of images without inline data.
    #[must_use]
    pub fn pending_images(&self) -> usize {
        self.images.iter().filter(|i| !i.has_data()).count()
    }
}
