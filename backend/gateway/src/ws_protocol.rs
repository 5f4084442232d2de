//! WebSocket protocol for the chat transport.

use serde::{Deserialize, Serialize};

/// Messages exchanged over the chat WebSocket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// Client -> Server: keep-alive
    Ping,
    /// Server -> Client: keep-alive response
    Pong,
    /// Client -> Server: one user-typed chat message
    Chat { content: String },
    /// Server -> Client: greeting sent once at session start
    Greeting { content: String },
    /// Server -> Client: the agent's reply to a chat message
    Reply { content: String },
    /// Server -> Client: a protocol-level error
    Error { code: String, message: String },
}
