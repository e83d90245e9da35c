//! Article payload construction.

use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use tracing::{debug, warn};

use crate::classify::detect_image_kind;
use crate::error::{ImageError, PayloadError};
use crate::source::{ArticleSource, sorted_entry_names};
use crate::types::{Article, Image};

/// Build the payload for a discovered article folder.
pub fn build_payload(source: &ArticleSource) -> Result<Article, PayloadError> {
    build_article(
        &source.name,
        &source.article_path,
        source.photos_dir.as_deref(),
    )
}

/// Build the payload from raw inputs.
///
/// `name` is the Markdown file name without `.md`. Without `photos_dir`
/// the image list is empty.
pub fn build_article(
    name: &str,
    article_path: &Path,
    photos_dir: Option<&Path>,
) -> Result<Article, PayloadError> {
    let bytes = fs::read(article_path).map_err(|source| PayloadError::ArticleFileRead {
        path: article_path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    if matches!(text, Cow::Owned(_)) {
        warn!(
            path = %article_path.display(),
            "Article is not valid UTF-8, invalid bytes replaced"
        );
    }

    let images = match photos_dir {
        Some(dir) => collect_images(dir)?,
        None => Vec::new(),
    };

    Ok(Article {
        id: None,
        title: title_from_name(name),
        content: text.trim().to_owned(),
        images,
        path: article_path.parent().map(Path::to_path_buf).unwrap_or_default(),
    })
}

/// Article title for a Markdown file name: underscores become spaces.
#[must_use]
pub fn title_from_name(name: &str) -> String {
    name.replace('_', " ")
}

fn collect_images(dir: &Path) -> Result<Vec<Image>, PayloadError> {
    let names = sorted_entry_names(dir).map_err(|source| PayloadError::PhotosDirRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut images = Vec::with_capacity(names.len());
    for name in names {
        let path = dir.join(&name);
        if path.is_dir() {
            debug!(path = %path.display(), "Skipping directory in photos folder");
            continue;
        }
        match load_image(&path) {
            Ok(image) => images.push(image),
            Err(e) => warn!("{e}, skipping"),
        }
    }
    Ok(images)
}

/// Read and encode one image.
///
/// Only a vanished file is an error. Unreadable files and files that are
/// not JPEG, PNG or GIF yield an image without data.
fn load_image(path: &Path) -> Result<Image, ImageError> {
    let filename = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ImageError::NotFound(path.to_path_buf()));
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Unable to read image, sending without data");
            return Ok(Image::pending(filename));
        }
    };

    match detect_image_kind(&bytes) {
        Some(kind) => {
            debug!(path = %path.display(), mime = kind.mime_type(), "Encoding image");
            Ok(Image {
                filename,
                data: Some(BASE64_STANDARD.encode(&bytes)),
            })
        }
        None => {
            warn!(path = %path.display(), "File is not a JPEG, PNG or GIF image, sending without data");
            Ok(Image::pending(filename))
        }
    }
}
