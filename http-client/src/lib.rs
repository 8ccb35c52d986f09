//! Private HTTP client for lightbulb device communication
//!
//! This crate provides the one transport primitive the bridge needs: an
//! asynchronous GET against an absolute URL that hands back the status code
//! and body. Interpreting the status or the body is left to the caller.

mod error;

pub use error::HttpError;

use async_trait::async_trait;
use std::time::Duration;

/// Raw response from a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    /// Create a response from a status code and body
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status code is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport used to reach a device
///
/// Implementations must not block the calling thread while the request is
/// in flight. One call issues exactly one request; there is no retry.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET against `url` and return the response
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError>;
}

/// Transport configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Overall request timeout
    /// Default: none, the underlying client's behaviour applies
    pub timeout: Option<Duration>,

    /// Value of the `User-Agent` header
    /// Default: `grlight/<version>`
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: concat!("grlight/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a ClientConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// [`HttpClient`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Create a client with default configuration
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Create a client from an explicit configuration
    pub fn with_config(config: &ClientConfig) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let inner = builder
            .build()
            .map_err(|e| HttpError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { inner })
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let response = self.inner.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::Body(e.to_string()))?;

        tracing::trace!(url, status, "device responded");

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }

    #[test]
    fn test_default_config_has_no_timeout() {
        let config = ClientConfig::default();
        assert!(config.timeout.is_none());
        assert!(config.user_agent.starts_with("grlight/"));

        let config = ClientConfig::new().with_timeout(Duration::from_secs(3));
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_client_creation() {
        let _client = ReqwestClient::new();
        let _default_client = ReqwestClient::default();
        assert!(ReqwestClient::with_config(&ClientConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/state")
            .with_status(200)
            .with_body(r#"{"state":true}"#)
            .create_async()
            .await;

        let client = ReqwestClient::new();
        let response = client
            .get(&format!("{}/state", server.url()))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"state":true}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_not_an_error_here() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/hue")
            .with_status(503)
            .create_async()
            .await;

        let response = ReqwestClient::new()
            .get(&format!("{}/hue", server.url()))
            .await
            .unwrap();

        assert_eq!(response.status, 503);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let result = ReqwestClient::new().get("http://127.0.0.1:1/state").await;

        match result {
            Err(HttpError::Network(_)) => {}
            other => panic!("Expected HttpError::Network, got {:?}", other),
        }
    }
}
