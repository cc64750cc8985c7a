//! Core HTTP operations
//!
//! Plain GET requests with status checking. No retry or rate limiting: a
//! failed request is reported to the caller once.

use reqwest::Client;
use url::Url;

use crate::errors::{DownloadError, DownloadResult};

/// HTTP operations handler
#[derive(Debug, Clone)]
pub struct HttpHandler {
    client: Client,
}

impl HttpHandler {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Issues a GET and fails on any non-success status
    ///
    /// # Errors
    ///
    /// Returns `DownloadError::Http` on transport failure and
    /// `DownloadError::ServerError` on a non-2xx response
    pub async fn get_response(&self, url: &Url) -> DownloadResult<reqwest::Response> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| transport_error(e, url))?;

        if !response.status().is_success() {
            tracing::debug!("GET {} returned {}", url, response.status());
            return Err(DownloadError::ServerError {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    /// Fetches a page body as text
    pub async fn get_page(&self, url: &Url) -> DownloadResult<String> {
        let response = self.get_response(url).await?;
        let text = response.text().await.map_err(|e| transport_error(e, url))?;
        tracing::debug!("Fetched page {} ({} bytes)", url, text.len());
        Ok(text)
    }

    /// Fetches a response body as raw bytes
    pub async fn get_bytes(&self, url: &Url) -> DownloadResult<Vec<u8>> {
        let response = self.get_response(url).await?;
        let bytes = response.bytes().await.map_err(|e| transport_error(e, url))?;
        tracing::debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

fn transport_error(error: reqwest::Error, url: &Url) -> DownloadError {
    if error.is_timeout() {
        DownloadError::Timeout {
            url: url.to_string(),
        }
    } else {
        DownloadError::Http(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::client::config::ClientConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn handler() -> HttpHandler {
        HttpHandler::new(ClientConfig::default().build_http_client().unwrap())
    }

    #[tokio::test]
    async fn test_get_page_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/episodes/all"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/episodes/all", server.uri())).unwrap();
        let body = handler().get_page(&url).await.unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.mp3"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/missing.mp3", server.uri())).unwrap();
        let result = handler().get_bytes(&url).await;
        assert!(matches!(
            result,
            Err(DownloadError::ServerError { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_slow_response_is_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(2)))
            .mount(&server)
            .await;

        let config = ClientConfig {
            request_timeout: Some(std::time::Duration::from_millis(100)),
            ..ClientConfig::default()
        };
        let handler = HttpHandler::new(config.build_http_client().unwrap());
        let url = Url::parse(&format!("{}/slow", server.uri())).unwrap();

        let result = handler.get_page(&url).await;
        assert!(matches!(result, Err(DownloadError::Timeout { .. })));
    }
}
