//! Session state - Everything one chat session owns
//!
//! The phase is not stored separately: a session is `Submitting` exactly
//! while `pending_input` is set.

use chat_core::Message;
use serde::{Deserialize, Serialize};

/// Greeting the original widget opens every session with.
pub const DEFAULT_GREETING: &str = "Hello! How can I assist you today?";

/// Coarse lifecycle phase of a chat session.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Waiting for the user to submit a draft.
    #[default]
    Idle,

    /// A submission is in flight; further submissions are rejected.
    Submitting,
}

/// Explicit state of one chat session.
///
/// Only the transition function mutates it, so every field is read through
/// accessors.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) transcript: Vec<Message>,
    pub(crate) pending_input: bool,
    pub(crate) typing_indicator: bool,
    pub(crate) draft_text: String,
}

impl SessionState {
    /// An empty, idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// An idle session whose transcript starts with a bot greeting.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            transcript: vec![Message::bot(greeting)],
            ..Self::default()
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn latest(&self) -> Option<&Message> {
        self.transcript.last()
    }

    pub fn is_pending(&self) -> bool {
        self.pending_input
    }

    pub fn is_typing(&self) -> bool {
        self.typing_indicator
    }

    pub fn draft(&self) -> &str {
        &self.draft_text
    }

    pub fn phase(&self) -> SessionPhase {
        if self.pending_input {
            SessionPhase::Submitting
        } else {
            SessionPhase::Idle
        }
    }

    /// Check if the input box should accept edits.
    pub fn accepts_user_input(&self) -> bool {
        !self.pending_input
    }

    /// Check if a submit action would be accepted right now.
    pub fn can_submit(&self) -> bool {
        !self.pending_input && !self.draft_text.trim().is_empty()
    }

    /// Get a human-readable description of the current phase.
    pub fn description(&self) -> &'static str {
        match self.phase() {
            SessionPhase::Idle => "Ready for input",
            SessionPhase::Submitting => "Typing...",
        }
    }

    /// Label of the submit button.
    pub fn submit_label(&self) -> &'static str {
        match self.phase() {
            SessionPhase::Idle => "Send",
            SessionPhase::Submitting => "...",
        }
    }
}
