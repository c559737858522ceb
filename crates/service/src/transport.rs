//! Transport to the hosted blockchains' endpoints.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Method};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while forwarding a relay to a hosted blockchain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The relay's method is not a valid HTTP method.
    #[error("invalid http method: {0}")]
    InvalidMethod(String),

    /// The request could not be sent or no response was received.
    #[error("request to {url} failed: {reason}")]
    Request {
        /// The URL of the request.
        url: String,
        /// Why the request failed.
        reason: String,
    },

    /// The response body could not be read.
    #[error("could not read response body: {0}")]
    Body(String),

    /// No response arrived in time.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The HTTP client could not be built.
    #[error("could not build http client: {0}")]
    Client(String),
}

/// Sends raw request bodies to a hosted blockchain's endpoint.
#[async_trait]
pub trait HttpTransport: fmt::Debug + Send + Sync {
    /// Sends `body` to `url` with `method` and returns the response body.
    async fn execute(&self, body: &[u8], url: &str, method: &str) -> Result<String, TransportError>;
}

/// [`HttpTransport`] backed by a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, body: &[u8], url: &str, method: &str) -> Result<String, TransportError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| TransportError::InvalidMethod(method.to_string()))?;

        debug!(%url, %method, len = body.len(), "forwarding relay");
        let response = self
            .client
            .request(method, url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_vec())
            .send()
            .await
            .map_err(|e| TransportError::Request {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "hosted chain returned an error status");
        }

        response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;

    /// Serves a single connection with a fixed response and returns the request it received.
    async fn serve_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = stream.read(&mut buf).await.unwrap();
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();

            String::from_utf8_lossy(&buf[..n]).into_owned()
        });

        (url, handle)
    }

    #[tokio::test]
    async fn test_execute_returns_body() {
        let (url, server) =
            serve_once("HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok").await;
        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();

        let body = transport.execute(b"{}", &url, "GET").await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(body, "ok");
        assert!(request.starts_with("GET / HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_error_status_still_returns_body() {
        let (url, _server) = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\nConnection: close\r\n\r\nfail",
        )
        .await;
        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();

        let body = transport.execute(b"{}", &url, "POST").await.unwrap();

        assert_eq!(body, "fail");
    }

    #[tokio::test]
    async fn test_invalid_method() {
        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();

        let err = transport
            .execute(b"{}", "http://127.0.0.1:1", "NOT A METHOD")
            .await
            .unwrap_err();

        assert_eq!(err, TransportError::InvalidMethod("NOT A METHOD".to_string()));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let err = transport.execute(b"{}", &url, "POST").await.unwrap_err();

        assert!(matches!(err, TransportError::Request { .. }));
    }
}
