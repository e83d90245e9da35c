//! Article discovery and payload building for pubmd.
//!
//! Turns a local article folder into the [`Article`] payload sent to the
//! remote content API:
//!
//! - [`ArticleSource::discover`] locates the single Markdown file and the
//!   optional `photos/` folder
//! - [`build_payload`] reads the Markdown text and encodes each image
//! - [`is_supported_image`] gates image data on its byte signature
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use pubmd_article::{ArticleSource, build_payload};
//!
//! let source = ArticleSource::discover(Path::new("articles/hello"))?;
//! let article = build_payload(&source)?;
//! println!("{} ({} images)", article.title, article.images.len());
//! # Ok(())
//! # }
//! ```

mod classify;
mod error;
mod payload;
mod source;
mod types;

pub use classify::{ImageKind, detect_image_kind, is_supported_image};
pub use error::{ImageError, PayloadError, SourceError};
pub use payload::{build_article, build_payload, title_from_name};
pub use source::{ArticleSource, PHOTOS_DIR};
pub use types::{Article, Image};
