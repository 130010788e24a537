//! Wire types shared by the chat client and the proxy forwarder.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Route the proxy forwarder is mounted on.
pub const PROXY_ROUTE: &str = "/api/proxy";

/// Body returned by the forwarder whenever relaying fails.
pub const FORWARD_ERROR_MESSAGE: &str = "Error forwarding request to n8n";

/// Payload the chat client sends to the proxy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyRequest {
    pub message: String,
}

impl ProxyRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Reply relayed back from the webhook.
///
/// Only `output` is interpreted; every other field is kept in `extra` so
/// callers can log the full reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProxyReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProxyReply {
    /// The bot reply text, if the webhook produced a usable one.
    ///
    /// Only a non-empty JSON string counts; `null`, `""`, numbers and objects
    /// are treated as absent.
    pub fn output_text(&self) -> Option<&str> {
        match &self.output {
            Some(Value::String(text)) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Error body produced by the forwarder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForwardErrorBody {
    pub error: String,
}

impl Default for ForwardErrorBody {
    fn default() -> Self {
        Self {
            error: FORWARD_ERROR_MESSAGE.to_string(),
        }
    }
}
