//! WebSocket entrypoint and session lifecycle.
//!
//! One connection is one session: on connect an empty history is
//! seeded and a greeting sent; each inbound chat message runs a full
//! turn before the next frame is read, so turns within a session are
//! serialized.

use axum::{
    extract::{
        ws::{Message as WsFrame, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use salamgate_core::Message;

use crate::server::GatewayState;
use crate::ws_protocol::WsMessage;

/// Greeting sent once when a session starts.
pub const SESSION_GREETING: &str = "Hello! How can I help you today?";

/// Fallback reply when a turn fails. A fixed apology keeps the
/// session alive and the transcript alternating.
pub const TURN_FAILURE_REPLY: &str =
    "Sorry, something went wrong handling that message. Please try again.";

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<GatewayState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_connection(socket, state))
}

async fn handle_connection(mut socket: WebSocket, state: GatewayState) {
    let session_id = Uuid::new_v4().to_string();
    info!(%session_id, "Chat session started");

    let greeting = start_session(&state, &session_id).await;
    if send(&mut socket, &greeting).await.is_err() {
        end_session(&state, &session_id).await;
        return;
    }

    // One frame at a time: a turn completes before the next frame is
    // read, which serializes messages within the session.
    while let Some(Ok(frame)) = socket.recv().await {
        match frame {
            WsFrame::Text(text) => {
                let reply = match serde_json::from_str::<WsMessage>(&text) {
                    Ok(WsMessage::Ping) => WsMessage::Pong,
                    Ok(WsMessage::Chat { content }) => {
                        run_turn(&state, &session_id, content).await
                    }
                    Ok(_) => {
                        warn!(%session_id, "Unexpected message type from client");
                        WsMessage::Error {
                            code: "unexpected_message".into(),
                            message: "only ping and chat are accepted".into(),
                        }
                    }
                    Err(_) => {
                        warn!(%session_id, "Received invalid JSON frame");
                        WsMessage::Error {
                            code: "invalid_json".into(),
                            message: "frame was not valid JSON".into(),
                        }
                    }
                };
                if send(&mut socket, &reply).await.is_err() {
                    break;
                }
            }
            WsFrame::Close(_) => break,
            _ => {} // Ignore binary, ping, pong frames.
        }
    }

    end_session(&state, &session_id).await;
    info!(%session_id, "Chat session closed");
}

/// Session start: seed an empty history and produce the one greeting
/// frame sent before the first user turn.
pub async fn start_session(state: &GatewayState, session_id: &str) -> WsMessage {
    state.store.set(session_id.to_string(), Vec::new()).await;
    WsMessage::Greeting {
        content: SESSION_GREETING.to_string(),
    }
}

/// Session teardown frees the transcript.
pub async fn end_session(state: &GatewayState, session_id: &str) {
    state.store.remove(session_id).await;
}

/// Handle one inbound chat message: append the user message, run the
/// agent, append the reply, persist. On failure the turn still
/// completes with a fixed apology so the transcript keeps alternating.
pub async fn run_turn(state: &GatewayState, session_id: &str, content: String) -> WsMessage {
    let mut history = state.store.get(session_id).await;
    history.push(Message::user(content));

    let reply = match state.runner.run(&state.agent, &history).await {
        Ok(msg) => msg,
        Err(e) => {
            error!(%session_id, error = %e, "Turn failed");
            Message::assistant(TURN_FAILURE_REPLY)
        }
    };

    let out = WsMessage::Reply {
        content: reply.content.clone(),
    };
    history.push(reply);
    state.store.set(session_id.to_string(), history).await;
    out
}

async fn send(socket: &mut WebSocket, msg: &WsMessage) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).unwrap_or_default();
    socket.send(WsFrame::Text(json)).await
}
