//! Chat controller - Drives a `ChatSession` against a proxy client
//!
//! The controller owns the session, executes the side effects each
//! transition asks for, and guarantees that every opened submission is
//! settled exactly once.

use std::sync::Arc;

use chat_core::{Message, ProxyReply};

use crate::client::{ClientError, ProxyClient};
use crate::machine::{ChatEvent, ChatSession, SessionState, SideEffect, StateTransition};
use crate::notify::Notifier;

/// Presentation hooks for a session.
pub trait ChatView {
    /// Redraw after any transition.
    fn render(&mut self, state: &SessionState);

    /// Bring the newest transcript entry into view.
    fn scroll_to_latest(&mut self, latest: &Message);
}

pub struct ChatController<V: ChatView> {
    session: ChatSession,
    client: Arc<dyn ProxyClient>,
    notifier: Box<dyn Notifier>,
    view: V,
}

impl<V: ChatView> ChatController<V> {
    pub fn new(client: Arc<dyn ProxyClient>, notifier: Box<dyn Notifier>, view: V) -> Self {
        Self::with_session(ChatSession::new(), client, notifier, view)
    }

    pub fn with_session(
        session: ChatSession,
        client: Arc<dyn ProxyClient>,
        notifier: Box<dyn Notifier>,
        view: V,
    ) -> Self {
        Self {
            session,
            client,
            notifier,
            view,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Shared handle on the proxy client, for hosts that run the round trip
    /// on their own task.
    pub fn client(&self) -> Arc<dyn ProxyClient> {
        Arc::clone(&self.client)
    }

    pub fn edit_draft(&mut self, text: impl Into<String>) -> StateTransition {
        self.dispatch(ChatEvent::draft(text))
    }

    /// Try to open a submission with the current draft.
    ///
    /// Returns the message to forward, or `None` when the gate is closed or
    /// the draft is blank. A `Some` must be followed by exactly one `settle`.
    pub fn begin_submission(&mut self) -> Option<String> {
        let transition = self.dispatch(ChatEvent::SubmitRequested);
        transition.forwarded_message().map(str::to_string)
    }

    /// Feed the result of the forwarded call back into the session.
    ///
    /// Always closes the gate, whatever the result.
    pub fn settle(&mut self, result: Result<ProxyReply, ClientError>) -> StateTransition {
        let event = match result {
            Ok(reply) => ChatEvent::replied(reply),
            Err(e) => ChatEvent::failed(e.to_string()),
        };
        self.dispatch(event)
    }

    /// Submit the current draft and wait for the reply.
    ///
    /// Returns `None` if the submission was rejected by the gate.
    pub async fn submit(&mut self) -> Option<StateTransition> {
        let message = self.begin_submission()?;
        let result = self.client.send_message(&message).await;
        Some(self.settle(result))
    }

    /// Convenience for hosts that set the draft and send in one step.
    pub async fn send(&mut self, text: impl Into<String>) -> Option<StateTransition> {
        self.edit_draft(text);
        self.submit().await
    }

    fn dispatch(&mut self, event: ChatEvent) -> StateTransition {
        let transition = self.session.handle_event(event);
        if transition.changed {
            self.view.render(self.session.state());
        }
        for effect in &transition.effects {
            self.run_effect(effect);
        }
        transition
    }

    fn run_effect(&mut self, effect: &SideEffect) {
        match effect {
            SideEffect::ScrollToLatest => {
                if let Some(latest) = self.session.state().latest() {
                    self.view.scroll_to_latest(latest);
                }
            }
            SideEffect::PlayNotification => {
                if let Err(e) = self.notifier.notify() {
                    tracing::warn!("Audio playback failed: {}", e);
                }
            }
            SideEffect::ReportAnomaly { reason } => {
                tracing::error!("{}", reason);
            }
            SideEffect::ForwardMessage { message } => {
                tracing::debug!(chars = message.chars().count(), "Submission opened");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::SessionPhase;
    use crate::notify::{NotifyError, SilentNotifier};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingView {
        renders: usize,
        scrolled_to: Vec<Message>,
    }

    impl ChatView for RecordingView {
        fn render(&mut self, _state: &SessionState) {
            self.renders += 1;
        }

        fn scroll_to_latest(&mut self, latest: &Message) {
            self.scrolled_to.push(latest.clone());
        }
    }

    /// Replies with a canned body, or fails when none is set.
    struct CannedClient {
        reply: Option<serde_json::Value>,
        sent: Mutex<Vec<String>>,
    }

    impl CannedClient {
        fn replying(body: serde_json::Value) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(body),
                sent: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                sent: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ProxyClient for CannedClient {
        async fn send_message(&self, message: &str) -> Result<ProxyReply, ClientError> {
            self.sent.lock().unwrap().push(message.to_string());
            match &self.reply {
                Some(body) => Ok(serde_json::from_value(body.clone())?),
                None => Err(ClientError::Decode(
                    serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
                )),
            }
        }
    }

    struct CountingNotifier {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl Notifier for CountingNotifier {
        fn notify(&self) -> Result<(), NotifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(NotifyError::Playback("no audio device".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn controller(
        client: Arc<CannedClient>,
        fail_notify: bool,
    ) -> (ChatController<RecordingView>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let notifier = CountingNotifier {
            calls: Arc::clone(&calls),
            fail: fail_notify,
        };
        (
            ChatController::new(client, Box::new(notifier), RecordingView::default()),
            calls,
        )
    }

    #[tokio::test]
    async fn test_reply_with_output_reaches_transcript() {
        let client = CannedClient::replying(serde_json::json!({ "output": "Hi there" }));
        let (mut controller, notifications) = controller(Arc::clone(&client), false);

        let settled = controller.send("Hello").await.expect("submission accepted");

        assert_eq!(settled.to, SessionPhase::Idle);
        assert_eq!(
            controller.state().transcript(),
            &[Message::user("Hello"), Message::bot("Hi there")]
        );
        assert_eq!(client.sent.lock().unwrap().as_slice(), ["Hello"]);
        assert_eq!(notifications.load(Ordering::SeqCst), 1);
        assert_eq!(
            controller.view().scrolled_to,
            vec![Message::user("Hello"), Message::bot("Hi there")]
        );
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_affect_state() {
        let client = CannedClient::replying(serde_json::json!({ "output": "Hi there" }));
        let (mut controller, notifications) = controller(client, true);

        controller.send("Hello").await;

        assert_eq!(notifications.load(Ordering::SeqCst), 1);
        assert_eq!(controller.state().transcript().len(), 2);
        assert_eq!(controller.state().phase(), SessionPhase::Idle);
    }

    #[tokio::test]
    async fn test_missing_output_leaves_transcript_alone() {
        let client = CannedClient::replying(serde_json::json!({}));
        let (mut controller, notifications) = controller(client, false);

        controller.send("Hello").await;

        assert_eq!(controller.state().transcript(), &[Message::user("Hello")]);
        assert!(!controller.state().is_pending());
        assert!(!controller.state().is_typing());
        assert_eq!(notifications.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_client_failure_reopens_gate() {
        let (mut controller, _) = controller(CannedClient::failing(), false);

        controller.send("Hello").await;

        assert_eq!(controller.state().phase(), SessionPhase::Idle);
        assert!(!controller.state().is_typing());
        assert_eq!(controller.state().transcript().len(), 1);

        // The next submission goes through.
        assert!(controller.send("again").await.is_some());
    }

    #[tokio::test]
    async fn test_blank_draft_never_reaches_client() {
        let client = CannedClient::replying(serde_json::json!({ "output": "unused" }));
        let (mut controller, _) = controller(Arc::clone(&client), false);

        assert!(controller.send("   ").await.is_none());
        assert!(client.sent.lock().unwrap().is_empty());
        assert!(controller.state().transcript().is_empty());
    }

    #[tokio::test]
    async fn test_gate_rejects_second_submission_until_settled() {
        let client = CannedClient::replying(serde_json::json!({ "output": "pong" }));
        let mut controller = ChatController::new(
            client,
            Box::new(SilentNotifier),
            RecordingView::default(),
        );

        controller.edit_draft("ping");
        let message = controller.begin_submission().expect("gate open");
        assert_eq!(message, "ping");

        controller.edit_draft("ping again");
        assert!(controller.begin_submission().is_none());
        assert_eq!(controller.state().draft(), "");

        let reply = controller.client().send_message(&message).await;
        controller.settle(reply);

        assert_eq!(controller.state().transcript().len(), 2);
        controller.edit_draft("ping again");
        assert!(controller.begin_submission().is_some());
    }
}
