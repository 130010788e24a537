//! Message - A single transcript entry
//!
//! Messages are immutable once created; the transcript only ever appends.

use serde::{Deserialize, Serialize};

/// Who authored a transcript entry.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// One entry of the chat transcript.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    text: String,
    sender: Sender,
}

impl Message {
    /// Create a message authored by the user
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    /// Create a message authored by the bot
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}
