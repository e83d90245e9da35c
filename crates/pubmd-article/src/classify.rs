//! Image format detection by byte signature.

use image::ImageFormat;

/// Image formats accepted as inline article data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
}

impl ImageKind {
    /// MIME type of the format.
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }
}

/// Sniff the image format from the leading bytes.
///
/// Returns `None` for anything that is not JPEG, PNG or GIF, including
/// other image formats. The file extension is never consulted.
#[must_use]
pub fn detect_image_kind(data: &[u8]) -> Option<ImageKind> {
    match image::guess_format(data).ok()? {
        ImageFormat::Jpeg => Some(ImageKind::Jpeg),
        ImageFormat::Png => Some(ImageKind::Png),
        ImageFormat::Gif => Some(ImageKind::Gif),
        _ => None,
    }
}

/// Whether `data` is a supported image.
#[must_use]
pub fn is_supported_image(data: &[u8]) -> bool {
    detect_image_kind(data).is_some()
}
