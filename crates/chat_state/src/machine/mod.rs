//! State machine module
//!
//! Contains the FSM implementation for a chat session.

mod events;
mod states;
mod transitions;

pub use events::{ChatEvent, SubmissionOutcome};
pub use states::{SessionPhase, SessionState, DEFAULT_GREETING};
pub use transitions::{transition, ChatSession, SideEffect, StateTransition};
