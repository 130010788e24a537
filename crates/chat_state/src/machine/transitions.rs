//! State transitions - Pure FSM transition logic
//!
//! `transition` maps (state, event) to (next state, side effects) without
//! touching anything else. `ChatSession` applies it and keeps a short history.

use chat_core::Message;

use super::events::{ChatEvent, SubmissionOutcome};
use super::states::{SessionPhase, SessionState};

const MAX_HISTORY: usize = 50;

/// Work the host must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    /// Send the message to the proxy and report back with a settlement event.
    ForwardMessage { message: String },

    /// A message was appended; the transcript view should follow it.
    ScrollToLatest,

    /// Best-effort notification for a new bot reply.
    PlayNotification,

    /// The submission settled without a usable reply.
    ReportAnomaly { reason: String },
}

/// Represents a state transition result.
#[derive(Debug, Clone)]
pub struct StateTransition {
    /// The phase before the transition.
    pub from: SessionPhase,
    /// The phase after the transition.
    pub to: SessionPhase,
    /// The event that triggered the transition.
    pub event: ChatEvent,
    /// Whether the session state actually changed.
    pub changed: bool,
    /// Side effects requested by the transition, in order.
    pub effects: Vec<SideEffect>,
}

impl StateTransition {
    /// The message to forward, if this transition opened a submission.
    pub fn forwarded_message(&self) -> Option<&str> {
        self.effects.iter().find_map(|effect| match effect {
            SideEffect::ForwardMessage { message } => Some(message.as_str()),
            _ => None,
        })
    }
}

/// Compute the next state and side effects for an event.
pub fn transition(state: &SessionState, event: &ChatEvent) -> (SessionState, Vec<SideEffect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match event {
        ChatEvent::DraftEdited { text } => {
            // Input is disabled while a submission is in flight.
            if state.accepts_user_input() {
                next.draft_text = text.clone();
            }
        }

        ChatEvent::SubmitRequested => {
            if state.can_submit() {
                let message = std::mem::take(&mut next.draft_text);
                next.transcript.push(Message::user(message.clone()));
                next.pending_input = true;
                next.typing_indicator = true;
                effects.push(SideEffect::ScrollToLatest);
                effects.push(SideEffect::ForwardMessage { message });
            }
        }

        ChatEvent::SubmissionSettled { outcome } => {
            // A settlement with nothing in flight has no user message to answer.
            if state.pending_input {
                match outcome {
                    SubmissionOutcome::Replied { reply } => match reply.output_text() {
                        Some(text) => {
                            next.transcript.push(Message::bot(text));
                            effects.push(SideEffect::ScrollToLatest);
                            effects.push(SideEffect::PlayNotification);
                        }
                        None => effects.push(SideEffect::ReportAnomaly {
                            reason: "API response did not contain expected 'output'".to_string(),
                        }),
                    },
                    SubmissionOutcome::Failed { error } => {
                        effects.push(SideEffect::ReportAnomaly {
                            reason: format!("Error sending message: {error}"),
                        });
                    }
                }
                next.pending_input = false;
                next.typing_indicator = false;
            }
        }
    }

    (next, effects)
}

/// State machine owning one chat session.
#[derive(Debug, Clone)]
pub struct ChatSession {
    /// Current state.
    state: SessionState,
    /// Transition history (limited).
    history: Vec<StateTransition>,
    /// Max history entries to keep.
    max_history: usize,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// Create an empty session in the Idle phase.
    pub fn new() -> Self {
        Self::with_state(SessionState::new())
    }

    /// Create a session starting from a specific state.
    pub fn with_state(state: SessionState) -> Self {
        Self {
            state,
            history: Vec::new(),
            max_history: MAX_HISTORY,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    /// Get the transition history.
    pub fn history(&self) -> &[StateTransition] {
        &self.history
    }

    /// Handle an event and move to the next state.
    pub fn handle_event(&mut self, event: ChatEvent) -> StateTransition {
        let from = self.state.phase();
        let (next, effects) = transition(&self.state, &event);
        let changed = next != self.state;
        self.state = next;

        let transition = StateTransition {
            from,
            to: self.state.phase(),
            event,
            changed,
            effects,
        };

        self.history.push(transition.clone());
        if self.history.len() > self.max_history {
            self.history.remove(0);
        }

        transition
    }

    /// Check if an event would change the state without applying it.
    pub fn would_change(&self, event: &ChatEvent) -> bool {
        transition(&self.state, event).0 != self.state
    }
}
