//! Tests for the WebSocket suggestion server.

use std::time::Duration;

use tokio_tungstenite::tungstenite::Message;

use super::handler::{handle_request, process_message};
use super::ServerState;
use crate::service::{ServiceConfig, ERROR_MESSAGE};

fn parse(response: &str) -> serde_json::Value {
    serde_json::from_str(response).expect("response is JSON")
}

fn state() -> ServerState {
    ServerState::new(ServiceConfig::default(), 2)
}

#[tokio::test]
async fn test_text_message_success() {
    let state = state();
    let msg = Message::Text(
        r#"{"instrument":"piano","style":"pop","mode":"melody","bars":1,"seed":3}"#.to_string(),
    );

    let response = process_message(msg, &state).await.expect("reply");
    let json = parse(&response);
    assert_eq!(json["success"], true);
    assert_eq!(json["suggestion"]["title"], "Pop melody (piano)");
    assert_eq!(json["suggestion"]["seed"], 3);
    assert!(json["suggestion"]["audioUrl"]
        .as_str()
        .unwrap()
        .starts_with("data:audio/wav;base64,"));
    assert_eq!(json["prompt"], "Generate a pop melody for piano with 1 bars");
}

#[tokio::test]
async fn test_binary_utf8_message() {
    let state = state();
    let msg = Message::Binary(
        br#"{"instrument":"bass","style":"rock","mode":"chord","bars":"1"}"#.to_vec(),
    );
    let json = parse(&process_message(msg, &state).await.unwrap());
    assert_eq!(json["success"], true);
    assert_eq!(json["suggestion"]["bars"], 1);
}

#[tokio::test]
async fn test_binary_non_utf8_message() {
    let json = parse(&process_message(Message::Binary(vec![0xff, 0xfe]), &state()).await.unwrap());
    assert_eq!(json["error"], ERROR_MESSAGE);
    assert_eq!(json["code"], "CLI_014");
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_control_messages_have_no_reply() {
    let state = state();
    assert!(process_message(Message::Ping(vec![1]), &state).await.is_none());
    assert!(process_message(Message::Close(None), &state).await.is_none());
    assert_eq!(state.request_count(), 0);
}

#[tokio::test]
async fn test_malformed_json() {
    let json = parse(&handle_request("not json".to_string(), &state()).await);
    assert_eq!(json["code"], "E004");
    assert_eq!(json["status"], 400);
    assert!(json.get("success").is_none());
}

#[tokio::test]
async fn test_negative_bars() {
    let body = r#"{"instrument":"piano","style":"pop","mode":"melody","bars":-3}"#;
    let json = parse(&handle_request(body.to_string(), &state()).await);
    assert_eq!(json["code"], "E002");
    assert_eq!(json["status"], 400);
    assert!(json["details"].as_str().unwrap().contains("at least 1"));
}

#[tokio::test]
async fn test_requests_are_counted() {
    let state = state();
    handle_request("{}".to_string(), &state).await;
    handle_request("[]".to_string(), &state).await;
    assert_eq!(state.request_count(), 2);
}

#[tokio::test]
async fn test_timeout_response() {
    let config = ServiceConfig {
        timeout: Duration::from_nanos(1),
        ..ServiceConfig::default()
    };
    let body = r#"{"instrument":"strings","style":"edm","mode":"melody","bars":8}"#;
    let json = parse(&handle_request(body.to_string(), &ServerState::new(config, 1)).await);
    assert_eq!(json["code"], "CLI_020");
    assert_eq!(json["status"], 504);
}

#[tokio::test]
async fn test_busy_server_times_out_waiting_for_a_slot() {
    let config = ServiceConfig {
        timeout: Duration::from_millis(50),
        ..ServiceConfig::default()
    };
    let state = ServerState::new(config, 1);
    let _busy = state.renders.acquire().await.unwrap();

    let body = r#"{"instrument":"piano","style":"pop","mode":"melody","bars":1}"#;
    let json = parse(&handle_request(body.to_string(), &state).await);
    assert_eq!(json["code"], "CLI_020");
    assert_eq!(json["status"], 504);
    assert!(json["details"].as_str().unwrap().contains("50 ms"));
}

#[tokio::test]
async fn test_slot_is_released_after_each_request() {
    let state = ServerState::new(ServiceConfig::default(), 1);
    let body = r#"{"instrument":"synth","style":"lofi","mode":"continue","bars":1}"#;
    for _ in 0..2 {
        let json = parse(&handle_request(body.to_string(), &state).await);
        assert_eq!(json["success"], true);
    }
    assert_eq!(state.renders.available_permits(), 1);
}
