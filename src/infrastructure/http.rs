//! HTTP transport using reqwest.

use crate::config::GATEWAY_URL;
use crate::domain::ports::Transport;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};

/// Posts XML bodies to the gateway endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// Transport for the production gateway.
    pub fn new() -> Self {
        Self::with_endpoint(GATEWAY_URL)
    }

    /// Transport for another endpoint, e.g. a sandbox.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Uses a caller-configured client (timeouts, proxies, certificates).
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn post(&self, body: String) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(body)
            .send()
            .await?
            .error_for_status()?;

        debug!(status = %response.status(), "gateway responded");
        Ok(response.bytes().await?.to_vec())
    }
}
