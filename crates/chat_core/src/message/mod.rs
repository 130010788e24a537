//! Message module - Transcript entries
//!
//! Shared message types used by the session state machine and its hosts.

mod content;

pub use content::{Message, Sender};
