//! Article folder discovery.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SourceError;

/// Name of the optional image folder inside an article folder.
pub const PHOTOS_DIR: &str = "photos";

/// Markdown extension, without the dot.
const ARTICLE_EXTENSION: &str = "md";

/// Raw inputs located inside an article folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSource {
    /// The article folder as given.
    pub folder: PathBuf,
    /// Markdown file name without the `.md` suffix.
    pub name: String,
    /// Path to the Markdown file.
    pub article_path: PathBuf,
    /// Path to `photos/`, when it exists.
    pub photos_dir: Option<PathBuf>,
}

impl ArticleSource {
    /// Locate the Markdown file and optional photos folder in `folder`.
    ///
    /// Entries are considered in file-name order. Exactly one `.md` file
    /// must exist.
    pub fn discover(folder: &Path) -> Result<Self, SourceError> {
        let metadata = match fs::metadata(folder) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::NotFound(folder.to_path_buf()));
            }
            Err(source) => {
                return Err(SourceError::Io {
                    path: folder.to_path_buf(),
                    source,
                });
            }
        };
        if !metadata.is_dir() {
            return Err(SourceError::NotADirectory(folder.to_path_buf()));
        }

        let mut candidates = Vec::new();
        for file_name in sorted_entry_names(folder).map_err(|source| SourceError::Io {
            path: folder.to_path_buf(),
            source,
        })? {
            let path = folder.join(&file_name);
            debug!(file = %file_name.to_string_lossy(), "Considering file in article folder");
            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext == ARTICLE_EXTENSION)
            {
                candidates.push(path);
            }
        }

        let article_path = match candidates.len() {
            0 => return Err(SourceError::NoArticleFile(folder.to_path_buf())),
            1 => candidates.remove(0),
            _ => {
                return Err(SourceError::MultipleArticleFiles {
                    folder: folder.to_path_buf(),
                    files: candidates
                        .iter()
                        .filter_map(|path| path.file_name())
                        .map(|name| name.to_string_lossy().into_owned())
                        .collect(),
                });
            }
        };

        let name = article_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let photos = folder.join(PHOTOS_DIR);
        let photos_dir = if photos.exists() {
            Some(photos)
        } else {
            debug!(folder = %folder.display(), "No photos folder");
            None
        };

        Ok(Self {
            folder: folder.to_path_buf(),
            name,
            article_path,
            photos_dir,
        })
    }
}

/// Names of the immediate entries of `dir`, sorted.
///
/// Names are kept as the OS returns them so they can be joined back onto
/// `dir` even when they are not valid UTF-8.
pub(crate) fn sorted_entry_names(dir: &Path) -> std::io::Result<Vec<OsString>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name());
    }
    names.sort();
    Ok(names)
}
