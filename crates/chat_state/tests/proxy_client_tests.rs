//! Integration tests for HttpProxyClient against a mocked forwarder

use chat_core::Message;
use chat_state::{
    ChatController, ChatView, ClientError, HttpProxyClient, ProxyClient, SessionPhase,
    SessionState, SilentNotifier,
};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct NullView;

impl ChatView for NullView {
    fn render(&mut self, _state: &SessionState) {}
    fn scroll_to_latest(&mut self, _latest: &Message) {}
}

#[tokio::test]
async fn test_posts_message_envelope_to_proxy_route() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/proxy"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({ "message": "hello" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "output": "Hi there", "runId": "r-1" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpProxyClient::new(&mock_server.uri());
    let reply = client.send_message("hello").await.expect("reply");

    assert_eq!(reply.output_text(), Some("Hi there"));
    assert_eq!(reply.extra.get("runId"), Some(&serde_json::json!("r-1")));
}

#[tokio::test]
async fn test_error_status_body_is_still_decoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/proxy"))
        .respond_with(ResponseTemplate::new(500).set_body_json(
            serde_json::json!({ "error": "Error forwarding request to n8n" }),
        ))
        .mount(&mock_server)
        .await;

    let client = HttpProxyClient::new(&mock_server.uri());
    let reply = client.send_message("hello").await.expect("json body");

    assert_eq!(reply.output_text(), None);
}

#[tokio::test]
async fn test_non_json_reply_is_a_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/proxy"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = HttpProxyClient::new(&mock_server.uri());
    let result = client.send_message("hello").await;

    assert!(matches!(result, Err(ClientError::Decode(_))));
}

#[tokio::test]
async fn test_unreachable_proxy_is_a_transport_error() {
    let client = HttpProxyClient::new("http://127.0.0.1:1");
    let result = client.send_message("hello").await;

    assert!(matches!(result, Err(ClientError::Transport(_))));
}

#[tokio::test]
async fn test_controller_round_trip_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/proxy"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "output": "Hi there" })),
        )
        .mount(&mock_server)
        .await;

    let client = Arc::new(HttpProxyClient::new(&mock_server.uri()));
    let mut controller = ChatController::with_session(
        chat_state::ChatSession::with_state(SessionState::with_greeting(
            chat_state::DEFAULT_GREETING,
        )),
        client,
        Box::new(SilentNotifier),
        NullView,
    );

    controller.send("test").await.expect("accepted");

    let state = controller.state();
    assert_eq!(state.phase(), SessionPhase::Idle);
    assert_eq!(
        state.transcript(),
        &[
            Message::bot(chat_state::DEFAULT_GREETING),
            Message::user("test"),
            Message::bot("Hi there"),
        ]
    );
}

#[tokio::test]
async fn test_controller_survives_unreachable_proxy() {
    let client = Arc::new(HttpProxyClient::new("http://127.0.0.1:1"));
    let mut controller = ChatController::new(client, Box::new(SilentNotifier), NullView);

    controller.send("test").await.expect("accepted");

    assert_eq!(controller.state().phase(), SessionPhase::Idle);
    assert!(!controller.state().is_typing());
    assert_eq!(controller.state().transcript(), &[Message::user("test")]);
}
