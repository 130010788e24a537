//! Configuration for the proxy forwarder
//!
//! Built from the layered `chat_core::Config` (defaults, `config.toml`, env).

use std::time::Duration;

use chat_core::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwarderConfig {
    /// Webhook every inbound body is relayed to.
    pub webhook_url: String,
    /// Upper bound for one upstream round trip; expiry is a forwarding failure.
    pub timeout: Duration,
}

impl From<&Config> for ForwarderConfig {
    fn from(config: &Config) -> Self {
        Self {
            webhook_url: config.webhook_url.clone(),
            timeout: Duration::from_secs(config.webhook_timeout_secs),
        }
    }
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Load ForwarderConfig from `config.toml` and environment variables
///
/// Environment variables:
/// - `WEBHOOK_URL`: upstream webhook (default: the fixed n8n webhook)
/// - `WEBHOOK_TIMEOUT_SECS`: upstream timeout in seconds (default: 60)
pub fn load_forwarder_config() -> ForwarderConfig {
    ForwarderConfig::from(&Config::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarder_config_has_sensible_defaults() {
        let config = ForwarderConfig::default();
        assert_eq!(config.webhook_url, chat_core::config::DEFAULT_WEBHOOK_URL);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_forwarder_config_follows_core_config() {
        let core = Config {
            webhook_url: "http://127.0.0.1:5678/webhook/test".to_string(),
            webhook_timeout_secs: 3,
            ..Config::default()
        };
        let config = ForwarderConfig::from(&core);
        assert_eq!(config.webhook_url, "http://127.0.0.1:5678/webhook/test");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }
}
