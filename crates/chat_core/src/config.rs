use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Webhook the proxy forwards to when nothing overrides it.
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://sangam.xendrax.in/webhook/e4fcbdf5-cdf7-48d5-a0e6-1c72021f4f63";
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_PROXY_URL: &str = "http://localhost:8080";

const CONFIG_FILE_PATH: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Upstream webhook the proxy relays to.
    pub webhook_url: String,
    /// Upper bound for one upstream round trip.
    pub webhook_timeout_secs: u64,
    /// Base URL of the proxy, as seen by chat clients.
    pub proxy_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            webhook_timeout_secs: DEFAULT_WEBHOOK_TIMEOUT_SECS,
            proxy_url: DEFAULT_PROXY_URL.to_string(),
        }
    }
}

impl Config {
    /// Defaults, then `config.toml` from the working directory, then env.
    ///
    /// A broken config file is logged and skipped rather than aborting startup.
    pub fn new() -> Self {
        let mut config = Config::default();

        if Path::new(CONFIG_FILE_PATH).exists() {
            match Self::from_file(Path::new(CONFIG_FILE_PATH)) {
                Ok(file_config) => config = file_config,
                Err(e) => log::warn!("Ignoring {}: {}", CONFIG_FILE_PATH, e),
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str::<Config>(&content)?)
    }

    /// Overlay values from a key lookup (normally the process environment).
    ///
    /// Blank values and unparsable numbers leave the current value in place.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = non_blank(lookup("WEBHOOK_URL")) {
            self.webhook_url = url;
        }
        if let Some(secs) = non_blank(lookup("WEBHOOK_TIMEOUT_SECS")) {
            match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => self.webhook_timeout_secs = secs,
                _ => log::warn!("Ignoring invalid WEBHOOK_TIMEOUT_SECS={secs:?}"),
            }
        }
        if let Some(url) = non_blank(lookup("PROXY_URL")) {
            self.proxy_url = url;
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
