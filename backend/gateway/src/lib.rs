//! salamgate HTTP/WebSocket front-end.
//!
//! Serves the chat transport, the OAuth callback gate, and a health
//! route.

pub mod auth;
pub mod health_api;
pub mod server;
pub mod ws_protocol;
pub mod ws_server;

pub use server::{start_server, GatewayState};
pub use ws_protocol::WsMessage;
