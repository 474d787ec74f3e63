use crate::core::PageFetcher;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Desktop browser user-agent sent with every request; some boards reject bare clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Single-shot GET with a fixed user-agent. No retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    /// `None` keeps the client default.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("Fetching {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Response status for {}: {}", url, status);

        if !status.is_success() {
            return Err(EtlError::FetchError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Resolves a script `src` found on `page_url` to an absolute URL.
pub fn resolve_url(page_url: &str, src: &str) -> Result<String> {
    if src.starts_with("http://") || src.starts_with("https://") {
        return Ok(src.to_string());
    }

    let base = Url::parse(page_url).map_err(|e| EtlError::InvalidConfigValueError {
        field: "source".to_string(),
        value: page_url.to_string(),
        reason: e.to_string(),
    })?;
    let joined = base
        .join(src)
        .map_err(|e| EtlError::parse(format!("Unresolvable script src '{}': {}", src, e)))?;
    Ok(joined.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_sends_fixed_user_agent() {
        let server = MockServer::start_async().await;
        let page = server
            .mock_async(|when, then| {
                when.method(GET).path("/board").header("user-agent", USER_AGENT);
                then.status(200).body("<table></table>");
            })
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let body = fetcher.fetch(&server.url("/board")).await.unwrap();

        page.assert_async().await;
        assert_eq!(body, "<table></table>");
    }

    #[tokio::test]
    async fn test_fetch_non_success_is_fetch_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/board");
                then.status(503);
            })
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher.fetch(&server.url("/board")).await.unwrap_err();

        match err {
            EtlError::FetchError { status, .. } => assert_eq!(status, 503),
            other => panic!("expected FetchError, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_url() {
        let page = "https://www.marc0.dev/en/leaderboard";
        assert_eq!(
            resolve_url(page, "/_next/static/chunks/app-1.js").unwrap(),
            "https://www.marc0.dev/_next/static/chunks/app-1.js"
        );
        assert_eq!(
            resolve_url(page, "https://cdn.example.com/a.js").unwrap(),
            "https://cdn.example.com/a.js"
        );
    }
}
