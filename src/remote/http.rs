use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use super::{DocumentError, DocumentStore};
use crate::vocab::Collection;

/// JSON blob endpoint: `GET` returns the document, `PUT` replaces it
pub struct HttpDocumentStore {
    client: Client,
    url: String,
}

impl HttpDocumentStore {
    pub fn new(url: String, timeout: Duration, connect_timeout: Duration) -> Result<Self, DocumentError> {
        let url = url.trim_end_matches('/').to_string();

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(DocumentError::InvalidUrl(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn check_status(&self, response: Response) -> Result<Response, DocumentError> {
        match response.status() {
            StatusCode::NOT_FOUND => Err(DocumentError::NotFound(self.url.clone())),
            status if !status.is_success() => Err(DocumentError::Server {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
            _ => Ok(response),
        }
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn fetch_all(&self) -> Result<Collection, DocumentError> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await?;
        let response = self.check_status(response).await?;

        let body = response.bytes().await?;
        // A freshly created blob may hold `null` instead of an empty array
        let topics: Option<Collection> = serde_json::from_slice(&body)?;
        let topics = topics.unwrap_or_default();
        log::debug!("Fetched {} topics from {}", topics.len(), self.url);
        Ok(topics)
    }

    async fn replace_all(&self, topics: &Collection) -> Result<(), DocumentError> {
        let body = serde_json::to_vec(topics)?;

        let response = self
            .client
            .put(&self.url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;
        self.check_status(response).await?;

        log::debug!("Replaced document at {} with {} topics", self.url, topics.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{StoreError, Topic, TopicStore};
    use chrono::Utc;
    use httpmock::prelude::*;
    use httpmock::MockServer;

    fn create_test_client(server: &MockServer) -> HttpDocumentStore {
        HttpDocumentStore::new(server.url("/blob"), Duration::from_secs(5), Duration::from_secs(5)).unwrap()
    }

    fn sample_topics() -> Collection {
        vec![Topic::new(1, "Phrasal Verbs".to_string(), Utc::now())]
    }

    #[tokio::test]
    async fn test_fetch_reads_document() {
        let server = MockServer::start_async().await;
        let topics = sample_topics();
        let body = serde_json::to_string(&topics).unwrap();
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/blob");
                then.status(200).header("content-type", "application/json").body(body);
            })
            .await;

        let fetched = create_test_client(&server).fetch_all().await.unwrap();
        assert_eq!(fetched, topics);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_null_is_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/blob");
                then.status(200).body("null");
            })
            .await;

        let fetched = create_test_client(&server).fetch_all().await.unwrap();
        assert!(fetched.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_missing_blob_is_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/blob");
                then.status(404);
            })
            .await;

        let result = create_test_client(&server).fetch_all().await;
        assert!(matches!(result, Err(DocumentError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_replace_sends_whole_document_as_json() {
        let server = MockServer::start_async().await;
        let topics = sample_topics();
        let expected = serde_json::to_value(&topics).unwrap();
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/blob")
                    .header("content-type", "application/json")
                    .json_body(expected);
                then.status(200);
            })
            .await;

        create_test_client(&server).replace_all(&topics).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_replace_server_error_carries_status_and_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(PUT).path("/blob");
                then.status(500).body("storage offline");
            })
            .await;

        let result = create_test_client(&server).replace_all(&sample_topics()).await;
        match result {
            Err(DocumentError::Server { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "storage offline");
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejected_write_leaves_store_unchanged() {
        let server = MockServer::start_async().await;
        let body = serde_json::to_string(&sample_topics()).unwrap();
        server
            .mock_async(|when, then| {
                when.method(GET).path("/blob");
                then.status(200).body(body);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(PUT).path("/blob");
                then.status(503).body("busy");
            })
            .await;

        let mut store = TopicStore::new(create_test_client(&server));
        store.load().await.unwrap();
        let before = store.topics().to_vec();

        let result = store.create_topic("Travel").await;
        assert!(matches!(
            result,
            Err(StoreError::Persistence(DocumentError::Server { status: 503, .. }))
        ));
        assert_eq!(store.topics(), before.as_slice());
    }

    #[test]
    fn test_rejects_non_http_url() {
        let result = HttpDocumentStore::new(
            "ftp://example.com/blob".to_string(),
            Duration::from_secs(5),
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(DocumentError::InvalidUrl(_))));
    }

    #[test]
    fn test_trims_trailing_slash() {
        let store = HttpDocumentStore::new(
            "https://jsonblob.example/api/blob/123/".to_string(),
            Duration::from_secs(5),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(store.url(), "https://jsonblob.example/api/blob/123");
    }
}
