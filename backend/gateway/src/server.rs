//! Gateway HTTP server and routing.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing::info;

use salamgate_agent::{Runner, SessionStore};
use salamgate_core::AgentDef;

use crate::auth;
use crate::health_api;
use crate::ws_server;

/// Application state shared across routes. Read-only after startup
/// except for session transcript appends inside the store.
#[derive(Clone)]
pub struct GatewayState {
    pub store: SessionStore,
    pub runner: Arc<Runner>,
    pub agent: Arc<AgentDef>,
}

/// Start the gateway HTTP server.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = Router::new()
        .route("/ws", get(ws_server::ws_handler))
        .route("/auth/callback", post(auth::oauth_callback_handler))
        .route("/api/health", get(health_api::get_health))
        .with_state(state);

    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
