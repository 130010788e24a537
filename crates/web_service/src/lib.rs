//! web_service - The proxy forwarder
//!
//! Exposes `POST /api/proxy`, which relays any JSON body to the configured
//! webhook and mirrors the webhook's status and JSON body back.

pub mod config;
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod server;
pub mod services;

pub use config::{load_forwarder_config, ForwarderConfig};
pub use server::{app_config, AppState, WebService};
