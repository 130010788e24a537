//! HTTP client for the proxy forwarder

use async_trait::async_trait;
use chat_core::{ProxyReply, ProxyRequest, PROXY_ROUTE};
use reqwest::Client;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Proxy request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Proxy reply was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait ProxyClient: Send + Sync {
    /// Send one user message and return the decoded reply.
    async fn send_message(&self, message: &str) -> Result<ProxyReply, ClientError>;
}

/// `ProxyClient` talking to a running forwarder over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProxyClient {
    client: Client,
    endpoint: String,
}

impl HttpProxyClient {
    pub fn new(proxy_url: &str) -> Self {
        Self::with_client(Client::new(), proxy_url)
    }

    pub fn with_client(client: Client, proxy_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", proxy_url.trim_end_matches('/'), PROXY_ROUTE),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ProxyClient for HttpProxyClient {
    async fn send_message(&self, message: &str) -> Result<ProxyReply, ClientError> {
        tracing::debug!(endpoint = %self.endpoint, "Sending message to proxy");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ProxyRequest::new(message))
            .send()
            .await?;

        // The body is decoded whatever the status; error bodies simply lack `output`.
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            tracing::debug!(%status, "Proxy replied with a non-success status");
        }

        Ok(serde_json::from_slice::<ProxyReply>(&body)?)
    }
}
