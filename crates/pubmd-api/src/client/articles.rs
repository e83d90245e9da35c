//! Article operations for the content API.

use pubmd_article::Article;
use tracing::info;

use super::ArticleClient;
use crate::error::ApiError;
use crate::transport::{ApiResponse, Method, Transport};
use crate::types::RemoteArticle;

impl<T: Transport> ArticleClient<T> {
    /// Fetch every article from the listing endpoint.
    ///
    /// Entries decode leniently; see [`RemoteArticle`].
    pub fn list_articles(&self) -> Result<Vec<RemoteArticle>, ApiError> {
        let response = self
            .execute(Method::Get, self.list_url(), None, self.authenticate_lookup)?
            .error_for_status()?;

        let articles: Vec<RemoteArticle> = serde_json::from_str(&response.body)?;
        info!("Found {} existing articles", articles.len());
        Ok(articles)
    }

    /// Create a new article.
    ///
    /// The body never carries an `id`. Returns the raw response on success.
    pub fn create_article(&self, article: &Article) -> Result<ApiResponse, ApiError> {
        let body = Article {
            id: None,
            ..article.clone()
        };
        self.send_json(Method::Post, self.create_url(), &body)?
            .error_for_status()
    }

    /// Update the article with the given ID in place.
    pub fn update_article(&self, id: u64, article: &Article) -> Result<ApiResponse, ApiError> {
        self.send_json(Method::Patch, self.update_url(id), &article.with_id(id))?
            .error_for_status()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use pubmd_article::Image;
    use serde_json::{Value, json};

    use super::*;
    use crate::client::test_support::api_config;
    use crate::transport::MockTransport;

    fn article() -> Article {
        Article {
            id: None,
            title: "testing".to_owned(),
            content: "This is a test article ![testing](testimage)".to_owned(),
            images: vec![Image::pending("testimage")],
            path: PathBuf::from("test"),
        }
    }

    fn body_json(body: Option<&Vec<u8>>) -> Value {
        serde_json::from_slice(body.unwrap()).unwrap()
    }

    #[test]
    fn test_list_articles() {
        let transport = MockTransport::new()
            .with_response(200, r#"[{"id": 1, "title": "First"}, {"id": 2, "title": "Second"}]"#);
        let client = ArticleClient::with_transport(&api_config(), &transport);

        let articles = client.list_articles().unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[1].id, Some(2));
        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].url, "https://blog.example.com/api/articles/all");
        assert_eq!(
            requests[0].authorization.as_deref(),
            Some("Basic ZWRpdG9yOnNlY3JldA==")
        );
        assert!(requests[0].body.is_none());
    }

    #[test]
    fn test_list_articles_tolerates_extra_fields() {
        let transport = MockTransport::new().with_response(
            200,
            r#"[
                {"id": 1, "title": "Other", "content": null},
                {"id": 7, "title": "testing", "images": [{"id": 3, "image": "/media/a.png"}]}
            ]"#,
        );
        let client = ArticleClient::with_transport(&api_config(), &transport);

        let articles = client.list_articles().unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[1].id, Some(7));
        assert_eq!(articles[1].title, "testing");
    }

    #[test]
    fn test_list_articles_without_lookup_auth() {
        let transport = MockTransport::new().with_response(200, "[]");
        let config = pubmd_config::ApiConfig {
            authenticate_lookup: false,
            ..api_config()
        };
        let client = ArticleClient::with_transport(&config, &transport);

        client.list_articles().unwrap();

        assert!(transport.requests()[0].authorization.is_none());
    }

    #[test]
    fn test_list_articles_invalid_body() {
        let transport = MockTransport::new().with_response(200, "<html>oops</html>");
        let client = ArticleClient::with_transport(&api_config(), &transport);

        assert!(matches!(client.list_articles(), Err(ApiError::Json(_))));
    }

    #[test]
    fn test_list_articles_error_status() {
        let transport = MockTransport::new().with_response(500, "boom");
        let client = ArticleClient::with_transport(&api_config(), &transport);

        assert!(matches!(
            client.list_articles(),
            Err(ApiError::HttpResponse { status: 500, .. })
        ));
    }

    #[test]
    fn test_create_article_body() {
        let transport = MockTransport::new().with_response(201, "{}");
        let client = ArticleClient::with_transport(&api_config(), &transport);

        client.create_article(&article().with_id(9)).unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "https://blog.example.com/api/articles");
        assert_eq!(
            body_json(request.body.as_ref()),
            json!({
                "title": "testing",
                "content": "This is a test article ![testing](testimage)",
                "images": [{"filename": "testimage", "data": null}]
            })
        );
    }

    #[test]
    fn test_update_article_body() {
        let transport = MockTransport::new().with_response(200, "{}");
        let client = ArticleClient::with_transport(&api_config(), &transport);

        client.update_article(7, &article()).unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.url, "https://blog.example.com/api/articles/7/");
        assert_eq!(body_json(request.body.as_ref())["id"], json!(7));
    }

    #[test]
    fn test_create_article_error_status() {
        let transport = MockTransport::new().with_response(403, "forbidden");
        let client = ArticleClient::with_transport(&api_config(), &transport);

        let err = client.create_article(&article()).unwrap_err();
        assert_eq!(err.to_string(), "HTTP error: 403 - forbidden");
    }
}
