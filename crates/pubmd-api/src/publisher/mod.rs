//! Article publisher.
//!
//! [`ArticlePublisher`] drives one publish run against the content API:
//!
//! 1. Look up the article by title
//! 2. Create it, or update the existing identity in place
//! 3. Attach image data at any upload targets the response lists
//!
//! Image upload failures are recorded in [`PublishResult`] and never abort
//! the run. Every other failure does.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use pubmd_api::{ArticleClient, ArticlePublisher};
//! use pubmd_article::{ArticleSource, build_payload};
//! use pubmd_config::Config;
//!
//! let config = Config::load(None, None)?;
//! let client = ArticleClient::from_config(&config.require_api()?);
//! let article = build_payload(&ArticleSource::discover(Path::new("article"))?)?;
//!
//! let result = ArticlePublisher::new(&client).publish(&article)?;
//! # Ok(())
//! # }
//! ```

mod error;
mod executor;
mod result;

pub use error::PublishError;
pub use executor::ArticlePublisher;
pub use result::{DryRunResult, PublishResult, UploadFailure};

/// Whether the run creates a new article or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishAction {
    Create,
    Update { id: u64 },
}
