//! chat_core - Core types shared by the chat relay
//!
//! This crate provides the foundational types used across the workspace:
//! - `message` - transcript entries (`Message`, `Sender`)
//! - `protocol` - client ↔ proxy wire types
//! - `config` - layered configuration (defaults, `config.toml`, env)

pub mod config;
pub mod message;
pub mod protocol;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use message::{Message, Sender};
pub use protocol::{ForwardErrorBody, ProxyReply, ProxyRequest, FORWARD_ERROR_MESSAGE, PROXY_ROUTE};
