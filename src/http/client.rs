//! HTTP client for feed downloads.
//!
//! Requests are made exactly once. Failures surface as
//! [`ProcessorError::FetchFailure`] so the caller decides whether to try again.

use anyhow::Result;
use log::debug;
use reqwest::{Client, StatusCode};

use crate::error::ProcessorError;

/// Thin wrapper around a shared reqwest Client.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Performs a GET request and returns the response body.
    #[tracing::instrument(skip(self))]
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_failure(url, &e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_failure(url, &describe_status(status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fetch_failure(url, &format!("failed to read response body: {}", e)))?;

        debug!("Received {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}

fn fetch_failure(url: &str, reason: &str) -> anyhow::Error {
    ProcessorError::FetchFailure(format!("{} ({})", reason, url)).into()
}

/// Human-readable reason for a non-success status.
fn describe_status(status: StatusCode) -> String {
    match status {
        StatusCode::NOT_FOUND => "the requested resource was not found (HTTP 404)".to_string(),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            format!("access denied (HTTP {})", status.as_u16())
        }
        StatusCode::TOO_MANY_REQUESTS => "too many requests (HTTP 429)".to_string(),
        s if s.is_server_error() => format!("server error (HTTP {})", s.as_u16()),
        s => format!("unexpected response (HTTP {})", s.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind_of;

    #[tokio::test]
    async fn test_get_bytes_success() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/feed.txt")
            .with_status(200)
            .with_body("test content")
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let body = client
            .get_bytes(&format!("{}/feed.txt", url))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body, b"test content");
    }

    #[tokio::test]
    async fn test_get_bytes_not_found_is_fetch_failure() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/feed.txt")
            .with_status(404)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let err = client
            .get_bytes(&format!("{}/feed.txt", url))
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(kind_of(&err), Some(ProcessorError::FetchFailure(_))));
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[tokio::test]
    async fn test_get_bytes_server_error_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/feed.txt")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let result = client.get_bytes(&format!("{}/feed.txt", url)).await;

        mock.assert_async().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_bytes_connection_refused() {
        let client = HttpClient::new(Client::new());
        let err = client
            .get_bytes("http://127.0.0.1:1/feed.txt")
            .await
            .unwrap_err();
        assert!(matches!(kind_of(&err), Some(ProcessorError::FetchFailure(_))));
    }

    #[test]
    fn test_describe_status() {
        assert!(describe_status(StatusCode::NOT_FOUND).contains("404"));
        assert!(describe_status(StatusCode::FORBIDDEN).contains("access denied"));
        assert!(describe_status(StatusCode::BAD_GATEWAY).contains("server error"));
        assert!(describe_status(StatusCode::IM_A_TEAPOT).contains("418"));
    }
}
