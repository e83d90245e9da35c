//! Publisher implementation.

use pubmd_article::Article;
use tracing::{debug, info, warn};

use crate::client::ArticleClient;
use crate::lookup::find_existing;
use crate::transport::Transport;
use crate::types::RemoteArticle;

use super::PublishAction;
use super::error::PublishError;
use super::result::{PublishResult, PublishedArticle, UploadFailure};

/// Publishes one article through an [`ArticleClient`].
pub struct ArticlePublisher<'a, T: Transport> {
    client: &'a ArticleClient<T>,
}

impl<'a, T: Transport> ArticlePublisher<'a, T> {
    /// Create a new publisher.
    #[must_use]
    pub fn new(client: &'a ArticleClient<T>) -> Self {
        Self { client }
    }

    /// Create or update the article on the remote API.
    ///
    /// This method:
    /// 1. Looks up an existing article with the same title
    /// 2. Creates the article, or updates the match in place
    /// 3. Uploads image data to every target listed in the response
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lookup fails (create vs. update cannot be decided)
    /// - The matched article has no ID
    /// - The create or update call fails
    ///
    /// Image upload failures are reported in the result instead.
    pub fn publish(&self, article: &Article) -> Result<PublishResult, PublishError> {
        let action = self.decide(article)?;

        let response = match action {
            PublishAction::Create => {
                info!(title = %article.title, "Creating article");
                self.client.create_article(article)?
            }
            PublishAction::Update { id } => {
                info!(title = %article.title, id, "Updating article");
                self.client.update_article(id, article)?
            }
        };
        info!(status = response.status, body = %response.body, "Received response");

        let published = PublishedArticle::parse(&response.body).unwrap_or_default();
        let (images_uploaded, failed_uploads) = self.upload_images(article, &published);

        let article_id = match action {
            PublishAction::Create => published.id,
            PublishAction::Update { id } => Some(id),
        };

        Ok(PublishResult {
            action,
            status: response.status,
            response_body: response.body,
            article_id,
            images_uploaded,
            failed_uploads,
        })
    }

    /// Decide between create and update from the remote listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails or the match has no ID.
    pub fn decide(&self, article: &Article) -> Result<PublishAction, PublishError> {
        let existing = find_existing(self.client, &article.title).map_err(PublishError::Lookup)?;
        match existing {
            None => Ok(PublishAction::Create),
            Some(RemoteArticle { id: Some(id), .. }) => Ok(PublishAction::Update { id }),
            Some(_) => Err(PublishError::MissingRemoteId {
                title: article.title.clone(),
            }),
        }
    }

    /// Upload image data to the targets listed in the response.
    ///
    /// Targets pair with the submitted images by position. Images without
    /// data have nothing to attach and are skipped. Each failure is logged
    /// and recorded; the remaining uploads still run.
    fn upload_images(
        &self,
        article: &Article,
        published: &PublishedArticle,
    ) -> (usize, Vec<UploadFailure>) {
        let mut uploaded = 0;
        let mut failures = Vec::new();

        for (image, target) in article.images.iter().zip(&published.images) {
            let Some(url) = target.upload_url.as_deref() else {
                continue;
            };
            if !image.has_data() {
                debug!(filename = %image.filename, url, "No image data to upload, skipping");
                continue;
            }
            match self.client.upload_image(url, image) {
                Ok(response) => {
                    info!(filename = %image.filename, status = response.status, "Uploaded image");
                    uploaded += 1;
                }
                Err(e) => {
                    warn!(filename = %image.filename, url, error = %e, "Image upload failed");
                    failures.push(UploadFailure {
                        filename: image.filename.clone(),
                        url: url.to_owned(),
                        error: e.to_string(),
                    });
                }
            }
        }

        (uploaded, failures)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use pubmd_article::Image;
    use serde_json::Value;

    use super::*;
    use crate::client::test_support::api_config;
    use crate::error::ApiError;
    use crate::transport::{Method, MockTransport};

    fn article() -> Article {
        Article {
            id: None,
            title: "testing".to_owned(),
            content: "This is a test article ![testing](testimage)".to_owned(),
            images: vec![
                Image::pending("testimage"),
                Image {
                    filename: "cover".to_owned(),
                    data: Some("R0lGODlh".to_owned()),
                },
            ],
            path: PathBuf::from("test"),
        }
    }

    /// Article whose images all carry data.
    fn encoded_article() -> Article {
        let encoded = |filename: &str| Image {
            filename: filename.to_owned(),
            data: Some("R0lGODlh".to_owned()),
        };
        Article {
            images: vec![encoded("first"), encoded("cover")],
            ..article()
        }
    }

    fn body_json(body: Option<&Vec<u8>>) -> Value {
        serde_json::from_slice(body.unwrap()).unwrap()
    }

    #[test]
    fn test_publish_creates_new_article() {
        let transport = MockTransport::new()
            .with_response(200, r#"[{"id": 1, "title": "Other"}]"#)
            .with_response(201, r#"{"id": 42, "title": "testing"}"#);
        let client = ArticleClient::with_transport(&api_config(), &transport);

        let result = ArticlePublisher::new(&client).publish(&article()).unwrap();

        assert_eq!(result.action, PublishAction::Create);
        assert_eq!(result.status, 201);
        assert_eq!(result.article_id, Some(42));
        assert_eq!(result.images_uploaded, 0);
        assert!(result.failed_uploads.is_empty());

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].method, Method::Post);
        assert_eq!(requests[1].url, "https://blog.example.com/api/articles");
        assert!(body_json(requests[1].body.as_ref()).get("id").is_none());
    }

    #[test]
    fn test_publish_updates_existing_article() {
        let transport = MockTransport::new()
            .with_response(200, r#"[{"id": 7, "title": "testing"}]"#)
            .with_response(200, r#"{"id": 7}"#);
        let client = ArticleClient::with_transport(&api_config(), &transport);

        let result = ArticlePublisher::new(&client).publish(&article()).unwrap();

        assert_eq!(result.action, PublishAction::Update { id: 7 });
        assert_eq!(result.article_id, Some(7));

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].method, Method::Patch);
        assert_eq!(requests[1].url, "https://blog.example.com/api/articles/7/");
        assert_eq!(body_json(requests[1].body.as_ref())["id"], 7);
    }

    #[test]
    fn test_publish_case_mismatch_creates() {
        let transport = MockTransport::new()
            .with_response(200, r#"[{"id": 7, "title": "Testing"}]"#)
            .with_response(201, "{}");
        let client = ArticleClient::with_transport(&api_config(), &transport);

        let result = ArticlePublisher::new(&client).publish(&article()).unwrap();
        assert_eq!(result.action, PublishAction::Create);
    }

    #[test]
    fn test_publish_lookup_failure_aborts() {
        let transport = MockTransport::new().with_failure("connection refused");
        let client = ArticleClient::with_transport(&api_config(), &transport);

        let result = ArticlePublisher::new(&client).publish(&article());

        assert!(matches!(result, Err(PublishError::Lookup(_))));
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_publish_unparsable_listing_aborts() {
        let transport = MockTransport::new().with_response(200, "not json");
        let client = ArticleClient::with_transport(&api_config(), &transport);

        let result = ArticlePublisher::new(&client).publish(&article());

        assert!(matches!(
            result,
            Err(PublishError::Lookup(ApiError::Json(_)))
        ));
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_publish_match_without_id() {
        let transport = MockTransport::new().with_response(200, r#"[{"title": "testing"}]"#);
        let client = ArticleClient::with_transport(&api_config(), &transport);

        let result = ArticlePublisher::new(&client).publish(&article());
        assert!(matches!(result, Err(PublishError::MissingRemoteId { .. })));
    }

    #[test]
    fn test_publish_create_failure_skips_uploads() {
        let transport = MockTransport::new()
            .with_response(200, "[]")
            .with_response(
                500,
                r#"{"images": [{"upload_url": "/up/1"}, {"upload_url": "/up/2"}]}"#,
            );
        let client = ArticleClient::with_transport(&api_config(), &transport);

        let result = ArticlePublisher::new(&client).publish(&article());

        assert!(matches!(
            result,
            Err(PublishError::Api(ApiError::HttpResponse { status: 500, .. }))
        ));
        assert_eq!(transport.call_count(), 2);
    }

    #[test]
    fn test_publish_uploads_images_positionally() {
        let transport = MockTransport::new()
            .with_response(200, "[]")
            .with_response(
                201,
                r#"{"id": 3, "images": [{"upload_url": "/api/images/10/"}, {"upload_url": "https://cdn.example.com/11"}]}"#,
            )
            .with_response(200, "{}")
            .with_response(200, "{}");
        let client = ArticleClient::with_transport(&api_config(), &transport);

        let result = ArticlePublisher::new(&client)
            .publish(&encoded_article())
            .unwrap();

        assert_eq!(result.images_uploaded, 2);
        let requests = transport.requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[2].url, "https://blog.example.com/api/images/10/");
        assert_eq!(body_json(requests[2].body.as_ref())["filename"], "first");
        assert_eq!(requests[3].url, "https://cdn.example.com/11");
        assert_eq!(body_json(requests[3].body.as_ref())["filename"], "cover");
        assert_eq!(body_json(requests[3].body.as_ref())["data"], "R0lGODlh");
        assert!(requests.iter().all(|r| r.authorization.is_some()));
    }

    #[test]
    fn test_publish_skips_images_without_target() {
        let transport = MockTransport::new()
            .with_response(200, "[]")
            .with_response(201, r#"{"images": [{"filename": "testimage"}, {"upload_url": "/up/2"}]}"#)
            .with_response(200, "{}");
        let client = ArticleClient::with_transport(&api_config(), &transport);

        let result = ArticlePublisher::new(&client).publish(&article()).unwrap();

        assert_eq!(result.images_uploaded, 1);
        assert_eq!(transport.requests()[2].url, "https://blog.example.com/up/2");
    }

    #[test]
    fn test_publish_skips_images_without_data() {
        let transport = MockTransport::new()
            .with_response(200, "[]")
            .with_response(
                201,
                r#"{"images": [{"upload_url": "/up/1"}, {"upload_url": "/up/2"}]}"#,
            )
            .with_response(200, "{}");
        let client = ArticleClient::with_transport(&api_config(), &transport);

        let result = ArticlePublisher::new(&client).publish(&article()).unwrap();

        assert_eq!(result.images_uploaded, 1);
        assert!(result.failed_uploads.is_empty());
        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[2].url, "https://blog.example.com/up/2");
        assert_eq!(body_json(requests[2].body.as_ref())["filename"], "cover");
    }

    #[test]
    fn test_publish_upload_failure_continues() {
        let transport = MockTransport::new()
            .with_response(200, "[]")
            .with_response(
                201,
                r#"{"images": [{"upload_url": "/up/1"}, {"upload_url": "/up/2"}]}"#,
            )
            .with_failure("connection reset")
            .with_response(200, "{}");
        let client = ArticleClient::with_transport(&api_config(), &transport);

        let result = ArticlePublisher::new(&client)
            .publish(&encoded_article())
            .unwrap();

        assert_eq!(result.images_uploaded, 1);
        assert_eq!(
            result.failed_uploads,
            vec![UploadFailure {
                filename: "first".to_owned(),
                url: "/up/1".to_owned(),
                error: "HTTP request to https://blog.example.com/up/1 failed: connection reset"
                    .to_owned(),
            }]
        );
        assert_eq!(transport.call_count(), 4);
    }

    #[test]
    fn test_publish_non_json_response_has_no_uploads() {
        let transport = MockTransport::new()
            .with_response(200, "[]")
            .with_response(201, "Created");
        let client = ArticleClient::with_transport(&api_config(), &transport);

        let result = ArticlePublisher::new(&client).publish(&article()).unwrap();

        assert_eq!(result.response_body, "Created");
        assert_eq!(result.article_id, None);
        assert_eq!(result.images_uploaded, 0);
        assert_eq!(transport.call_count(), 2);
    }
}
