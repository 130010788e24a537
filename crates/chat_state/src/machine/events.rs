//! Chat events - Inputs that drive the session state machine

use chat_core::ProxyReply;
use serde::{Deserialize, Serialize};

/// How an in-flight submission ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// The proxy answered with a JSON body (whatever its status).
    Replied { reply: ProxyReply },

    /// The round trip failed before a JSON body was obtained.
    Failed { error: String },
}

/// Defines the events that can trigger state transitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ChatEvent {
    /// The user changed the draft text.
    DraftEdited { text: String },

    /// The user pressed send.
    SubmitRequested,

    /// The forwarded call settled.
    SubmissionSettled { outcome: SubmissionOutcome },
}

impl ChatEvent {
    /// Convenience constructor for a draft edit.
    pub fn draft(text: impl Into<String>) -> Self {
        Self::DraftEdited { text: text.into() }
    }

    /// Convenience constructor for a settled reply.
    pub fn replied(reply: ProxyReply) -> Self {
        Self::SubmissionSettled {
            outcome: SubmissionOutcome::Replied { reply },
        }
    }

    /// Convenience constructor for a failed round trip.
    pub fn failed(error: impl Into<String>) -> Self {
        Self::SubmissionSettled {
            outcome: SubmissionOutcome::Failed {
                error: error.into(),
            },
        }
    }

    /// Check if this event is user-initiated.
    pub fn is_user_event(&self) -> bool {
        matches!(self, Self::DraftEdited { .. } | Self::SubmitRequested)
    }

    /// Check if this event ends a submission.
    pub fn is_settlement(&self) -> bool {
        matches!(self, Self::SubmissionSettled { .. })
    }
}
