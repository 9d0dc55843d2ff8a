//! Request handler logic for the WebSocket suggestion server.

use std::time::Instant;

use tokio_tungstenite::tungstenite::Message;

use super::ServerState;
use crate::commands::json_output::error_codes;
use crate::service::{
    suggest_with_deadline, to_response_json, ErrorResponse, ServiceConfig, ServiceError,
};

/// Process a single WebSocket message and return a response.
pub async fn process_message(msg: Message, state: &ServerState) -> Option<String> {
    match msg {
        Message::Text(text) => Some(handle_request(text, state).await),
        Message::Binary(data) => match String::from_utf8(data) {
            Ok(text) => Some(handle_request(text, state).await),
            Err(_) => {
                let error = ErrorResponse::new(
                    error_codes::NON_UTF8_MESSAGE,
                    "Binary message must be valid UTF-8 JSON",
                    400,
                );
                Some(serde_json::to_string(&error).unwrap_or_else(|_| {
                    r#"{"error":"Failed to generate AI suggestion","details":"Binary message must be valid UTF-8 JSON","code":"CLI_014","status":400}"#.to_string()
                }))
            }
        },
        // Ping/pong are answered by tungstenite; close and raw frames need no reply.
        Message::Ping(_) | Message::Pong(_) | Message::Close(_) | Message::Frame(_) => None,
    }
}

/// Handle a JSON request and return a JSON response.
///
/// Waiting for a render slot counts against the request's deadline.
pub async fn handle_request(json_text: String, state: &ServerState) -> String {
    let request_id = state.next_request_id();
    let started = Instant::now();
    let timeout = state.config.timeout;

    let result = match tokio::time::timeout(timeout, state.renders.acquire()).await {
        Ok(Ok(_permit)) => {
            let remaining = timeout.saturating_sub(started.elapsed());
            let config = ServiceConfig {
                timeout: remaining,
                ..state.config.clone()
            };
            suggest_with_deadline(json_text, config)
                .await
                .map_err(|err| match err {
                    ServiceError::Timeout(_) => ServiceError::Timeout(timeout),
                    other => other,
                })
        }
        Ok(Err(_closed)) => Err(ServiceError::Task("render queue closed".to_string())),
        Err(_) => {
            log::warn!("request #{} waited {:?} for a render slot", request_id, timeout);
            Err(ServiceError::Timeout(timeout))
        }
    };

    match &result {
        Ok(response) => log::info!(
            "request #{} answered with {} in {:?}",
            request_id,
            response.suggestion.id,
            started.elapsed()
        ),
        Err(err) => log::error!("request #{} failed [{}]: {}", request_id, err.code(), err),
    }
    to_response_json(&result)
}
