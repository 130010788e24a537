//! chat_state - State machine and controller for a chat session
//!
//! This crate provides the session state machine (pure transitions over an
//! explicit `SessionState`), the controller that executes its side effects,
//! and the HTTP client used to reach the proxy forwarder.

pub mod client;
pub mod controller;
pub mod machine;
pub mod notify;

// Re-export commonly used types
pub use client::{ClientError, HttpProxyClient, ProxyClient};
pub use controller::{ChatController, ChatView};
pub use machine::{
    transition, ChatEvent, ChatSession, SessionPhase, SessionState, SideEffect, StateTransition,
    SubmissionOutcome, DEFAULT_GREETING,
};
pub use notify::{Notifier, NotifyError, SilentNotifier};
