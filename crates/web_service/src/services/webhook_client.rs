//! Client for the upstream automation webhook

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::ForwarderConfig;

/// What the webhook answered: its status code and decoded JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

#[async_trait]
pub trait WebhookClientTrait: Send + Sync {
    /// POST `payload` to the webhook and decode its JSON reply.
    async fn forward(&self, payload: &Value) -> Result<UpstreamReply>;
}

#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
    webhook_url: String,
}

impl WebhookClient {
    pub fn new(config: &ForwarderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            webhook_url: config.webhook_url.clone(),
        })
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }
}

#[async_trait]
impl WebhookClientTrait for WebhookClient {
    async fn forward(&self, payload: &Value) -> Result<UpstreamReply> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("POST {} failed", self.webhook_url))?;

        let status = response.status().as_u16();
        let body = response
            .json::<Value>()
            .await
            .with_context(|| format!("Webhook answered {status} with a non-JSON body"))?;

        Ok(UpstreamReply { status, body })
    }
}
