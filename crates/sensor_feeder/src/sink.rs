//! Delivery sinks for sample readings.
//!
//! [`HttpSink`] POSTs each reading as JSON to the backend ingestion endpoint.
//! Only the status code of the response is looked at.

use crate::error::FeederError;
use crate::sample::SampleReading;
use async_trait::async_trait;
use reqwest::StatusCode;

/// Destination for sample readings
#[async_trait]
pub trait ReadingSink: Send + Sync {
    /// Human readable destination, used in log lines
    fn destination(&self) -> &str;

    /// Deliver one reading. Errors are classified, never retried.
    async fn submit(&self, reading: &SampleReading) -> Result<(), FeederError>;
}

/// HTTP sink for the backend ingestion endpoint
pub struct HttpSink {
    url: String,
    client: reqwest::Client,
}

impl HttpSink {
    /// Create a new sink posting to `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    /// Create a sink sharing an existing client
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// Endpoint readings are posted to
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// 4xx and 5xx are failures; anything else that reaches us counts as delivered
fn is_failure(status: StatusCode) -> bool {
    status.is_client_error() || status.is_server_error()
}

#[async_trait]
impl ReadingSink for HttpSink {
    fn destination(&self) -> &str {
        &self.url
    }

    async fn submit(&self, reading: &SampleReading) -> Result<(), FeederError> {
        // .json() sets Content-Type: application/json
        let response = self
            .client
            .post(&self.url)
            .json(reading.fields())
            .send()
            .await
            .map_err(|source| FeederError::Transport {
                payload: reading.to_string(),
                source,
            })?;

        let status = response.status();
        tracing::debug!(status = %status, url = %self.url, "Backend responded");

        if is_failure(status) {
            return Err(FeederError::HttpStatus {
                status,
                payload: reading.to_string(),
            });
        }

        Ok(())
    }
}
