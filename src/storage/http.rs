use crate::core::{Document, DocumentStore};
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use url::Url;

/// Hosted document store over a plain JSON REST contract:
///
/// - `GET    {base}/{collection}/{id}` returns the document body, 404 if absent
/// - `PUT    {base}/{collection}/{id}` replaces the document body
/// - `DELETE {base}/{collection}/{id}`
/// - `GET    {base}/{collection}` returns `[{"id": .., "data": ..}, ..]`
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpDocumentStore {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        // Url::join drops the last segment unless the base ends with '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| EtlError::InvalidConfigValueError {
            field: "storage.document_store_url".to_string(),
            value: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client: Client::builder().build()?,
            base_url,
            token,
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| EtlError::config("document store URL cannot be a base"))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn failure(action: &str, url: &Url, status: StatusCode) -> EtlError {
        EtlError::store(format!("{} {} returned HTTP {}", action, url, status.as_u16()))
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let url = self.url(&[collection, id])?;
        let response = self.authorized(self.client.get(url.clone())).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(Self::failure("GET", &url, status)),
        }
    }

    async fn put(&self, collection: &str, id: &str, data: &Value) -> Result<()> {
        let url = self.url(&[collection, id])?;
        let response = self
            .authorized(self.client.put(url.clone()).json(data))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::failure("PUT", &url, response.status()));
        }
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let url = self.url(&[collection])?;
        let response = self.authorized(self.client.get(url.clone())).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            status if status.is_success() => Ok(response.json().await?),
            status => Err(Self::failure("GET", &url, status)),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let url = self.url(&[collection, id])?;
        let response = self.authorized(self.client.delete(url.clone())).send().await?;
        let status = response.status();
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(Self::failure("DELETE", &url, status));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_missing_document_is_none() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/leaderboards/arena");
                then.status(404);
            })
            .await;

        let store = HttpDocumentStore::new(&server.url("/v1"), None).unwrap();
        assert!(store.get("leaderboards", "arena").await.unwrap().is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_put_sends_bearer_token_and_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/leaderboards/performance")
                    .header("authorization", "Bearer secret")
                    .json_body(json!({"source": "x"}));
                then.status(200);
            })
            .await;

        let store = HttpDocumentStore::new(&server.base_url(), Some("secret".to_string())).unwrap();
        store
            .put("leaderboards", "performance", &json!({"source": "x"}))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_parses_documents() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/todos");
                then.status(200).json_body(json!([
                    {"id": "a", "data": {"title": "renew"}},
                    {"id": "b", "data": {"title": "invoice"}}
                ]));
            })
            .await;

        let store = HttpDocumentStore::new(&server.base_url(), None).unwrap();
        let docs = store.list("todos").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "a");
        assert_eq!(docs[1].data["title"], "invoice");
    }

    #[tokio::test]
    async fn test_server_error_is_store_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/leaderboards/arena");
                then.status(500);
            })
            .await;

        let store = HttpDocumentStore::new(&server.base_url(), None).unwrap();
        let err = store.get("leaderboards", "arena").await.unwrap_err();
        assert!(matches!(err, EtlError::StoreError { .. }));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(HttpDocumentStore::new("not a url", None).is_err());
    }
}
