//! A recording [`HttpTransport`] for tests.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::transport::{HttpTransport, TransportError};

/// A request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SentRequest {
    pub(crate) body: Vec<u8>,
    pub(crate) url: String,
    pub(crate) method: String,
}

/// Answers every request with a fixed response after an optional delay.
#[derive(Debug)]
pub(crate) struct MockTransport {
    response: Result<String, TransportError>,
    delay: Option<Duration>,
    sent: Mutex<Vec<SentRequest>>,
}

impl MockTransport {
    pub(crate) fn responding(body: &str) -> Self {
        Self {
            response: Ok(body.to_string()),
            delay: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(err: TransportError) -> Self {
        Self {
            response: Err(err),
            delay: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, body: &[u8], url: &str, method: &str) -> Result<String, TransportError> {
        self.sent.lock().push(SentRequest {
            body: body.to_vec(),
            url: url.to_string(),
            method: method.to_string(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.response.clone()
    }
}
