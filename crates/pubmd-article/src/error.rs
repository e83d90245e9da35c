//! Error types for article discovery and payload building.

use std::io;
use std::path::PathBuf;

/// Error while locating the article inside its folder.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The article folder does not exist.
    #[error("Article folder {} does not exist", .0.display())]
    NotFound(PathBuf),

    /// The article path exists but is not a directory.
    #[error("Article folder {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// No `.md` file in the folder.
    #[error("Folder {} must contain an article written as a `.md` file", .0.display())]
    NoArticleFile(PathBuf),

    /// More than one `.md` file in the folder.
    #[error("Folder {} contains more than one `.md` file: {}", folder.display(), files.join(", "))]
    MultipleArticleFiles {
        /// Article folder.
        folder: PathBuf,
        /// Names of the candidate files, in scan order.
        files: Vec<String>,
    },

    /// I/O error while listing the folder.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Fatal error while building the article payload.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The Markdown file could not be read.
    #[error("Error reading article file {}: {source}", path.display())]
    ArticleFileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The photos folder exists but could not be listed.
    #[error("Error reading photos folder {}: {source}", path.display())]
    PhotosDirRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Per-image failure that drops the image from the payload.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// The file vanished between listing and reading.
    #[error("Image {} not found", .0.display())]
    NotFound(PathBuf),
}
