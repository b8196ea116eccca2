//! PostgREST client
//!
//! Talks to `{url}/rest/v1/{collection}` with the project's anon key.

use super::{BackendError, Collection, ContentBackend, Row, SelectQuery};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
}

/// HTTP backend over the hosted PostgREST API
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
}

impl RestBackend {
    /// Build a client for the project at `url` using `anon_key`
    ///
    /// # Errors
    /// * Returns `BackendError::InvalidKey` if the key is not a valid header value
    /// * Returns `BackendError::Transport` if the HTTP client cannot be built
    pub fn new(url: &str, anon_key: &str, timeout: Duration) -> Result<Self, BackendError> {
        let key = HeaderValue::from_str(anon_key)
            .map_err(|e| BackendError::InvalidKey(e.to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", anon_key))
            .map_err(|e| BackendError::InvalidKey(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, collection: Collection) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection.as_str())
    }

    /// Turn a non-success response into `BackendError::Status`
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());
        let message = serde_json::from_str::<PostgrestError>(&body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or(body);

        tracing::debug!(status = status.as_u16(), message = %message, "Backend returned error status");

        Err(BackendError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ContentBackend for RestBackend {
    async fn select(
        &self,
        collection: Collection,
        query: &SelectQuery,
    ) -> Result<Vec<Row>, BackendError> {
        let url = self.table_url(collection);
        tracing::debug!(url = %url, collection = %collection, "Selecting rows");

        let response = self
            .client
            .get(&url)
            .query(&query.to_params())
            .send()
            .await?;
        let response = Self::check(response).await?;

        let body = response.text().await?;
        serde_json::from_str::<Vec<Row>>(&body).map_err(|e| {
            BackendError::Decode(format!("{} - Response body: {}", e, body))
        })
    }

    async fn insert(&self, collection: Collection, rows: &[Value]) -> Result<(), BackendError> {
        if rows.is_empty() {
            return Ok(());
        }

        let response = self
            .client
            .post(self.table_url(collection))
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_all(&self, collection: Collection) -> Result<(), BackendError> {
        // Unfiltered deletes are refused; a not-null filter on the key matches every row.
        let response = self
            .client
            .delete(self.table_url(collection))
            .query(&[(collection.key_column(), "not.is.null")])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn upsert(&self, collection: Collection, row: &Value) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.table_url(collection))
            .query(&[("on_conflict", collection.key_column())])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(row)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Direction;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use serial_test::serial;

    fn backend_for(server: &Server) -> RestBackend {
        RestBackend::new(&server.url(), "anon-key", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn test_select_sends_key_and_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/services")
            .match_header("apikey", "anon-key")
            .match_header("authorization", "Bearer anon-key")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("select".into(), "*".into()),
                Matcher::UrlEncoded("order".into(), "id.asc".into()),
            ]))
            .with_status(200)
            .with_body(r#"[{"id": 1, "title": "Decor"}, {"id": 2, "title": "Catering"}]"#)
            .create_async()
            .await;

        let backend = backend_for(&server);
        let rows = backend
            .select(
                Collection::Services,
                &SelectQuery::all().order("id", Direction::Ascending),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["title"], "Catering");
    }

    #[tokio::test]
    #[serial]
    async fn test_select_error_uses_postgrest_message() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/team_members")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"code": "42P01", "message": "relation \"public.team_members\" does not exist"}"#)
            .create_async()
            .await;

        let backend = backend_for(&server);
        let result = backend
            .select(Collection::TeamMembers, &SelectQuery::all())
            .await;

        mock.assert_async().await;
        match result {
            Err(BackendError::Status { status, message }) => {
                assert_eq!(status, 404);
                assert!(message.contains("does not exist"));
            }
            other => panic!("Expected status error, got: {:?}", other),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_select_invalid_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/services")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("This is not JSON")
            .create_async()
            .await;

        let backend = backend_for(&server);
        let result = backend.select(Collection::Services, &SelectQuery::all()).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(BackendError::Decode(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_insert_posts_array() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/testimonials")
            .match_header("prefer", "return=minimal")
            .match_body(Matcher::Json(json!([{"client_name": "Amina", "quote": "Lovely"}])))
            .with_status(201)
            .create_async()
            .await;

        let backend = backend_for(&server);
        let rows = vec![json!({"client_name": "Amina", "quote": "Lovely"})];
        backend.insert(Collection::Testimonials, &rows).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    #[serial]
    async fn test_insert_empty_sends_nothing() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/services")
            .expect(0)
            .create_async()
            .await;

        let backend = backend_for(&server);
        backend.insert(Collection::Services, &[]).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    #[serial]
    async fn test_delete_all_filters_on_key() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/rest/v1/gallery_items")
            .match_query(Matcher::UrlEncoded("id".into(), "not.is.null".into()))
            .with_status(204)
            .create_async()
            .await;

        let backend = backend_for(&server);
        backend.delete_all(Collection::GalleryItems).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    #[serial]
    async fn test_upsert_merges_on_key() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/site_content")
            .match_query(Matcher::UrlEncoded("on_conflict".into(), "key".into()))
            .match_header("prefer", "resolution=merge-duplicates,return=minimal")
            .with_status(201)
            .create_async()
            .await;

        let backend = backend_for(&server);
        let row = json!({"key": "hero_image_url", "value": "https://img/hero.jpg"});
        backend.upsert(Collection::SiteContent, &row).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let backend =
            RestBackend::new("http://127.0.0.1:1", "anon-key", Duration::from_secs(2)).unwrap();
        let result = backend.select(Collection::Services, &SelectQuery::all()).await;
        assert!(matches!(result, Err(BackendError::Transport(_))));
    }

    #[test]
    fn test_key_with_control_characters_is_rejected() {
        let result = RestBackend::new("http://127.0.0.1:1", "anon\nkey", Duration::from_secs(2));
        assert!(matches!(result, Err(BackendError::InvalidKey(_))));
    }
}
