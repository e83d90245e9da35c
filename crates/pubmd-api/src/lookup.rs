//! Remote lookup of an existing article by title.

use tracing::{debug, info};

use crate::client::ArticleClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::RemoteArticle;

/// Find the remote article whose title equals `title`.
///
/// Fetches the full listing and returns the first exact, case-sensitive
/// match. `Ok(None)` means the article does not exist yet.
pub fn find_existing<T: Transport>(
    client: &ArticleClient<T>,
    title: &str,
) -> Result<Option<RemoteArticle>, ApiError> {
    let articles = client.list_articles()?;
    let found = find_by_title(articles, title);
    match &found {
        Some(article) => info!(title, id = ?article.id, "Found existing article"),
        None => debug!(title, "No existing article"),
    }
    Ok(found)
}

/// First article in `articles` titled exactly `title`.
pub fn find_by_title(articles: Vec<RemoteArticle>, title: &str) -> Option<RemoteArticle> {
    articles.into_iter().find(|article| article.title == title)
}
