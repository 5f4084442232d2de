//! In-memory per-session transcript storage.
//!
//! Scoped to the process lifetime: no persistence, no eviction beyond
//! removal at session teardown. Safe for concurrent access from
//! independent sessions; each session is only driven by its own
//! connection task.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use salamgate_core::Message;

pub type SessionId = String;

/// Maps session ids to their ordered, append-only transcripts.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Vec<Message>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript for the session, empty if none exists.
    pub async fn get(&self, session_id: &str) -> Vec<Message> {
        let r = self.sessions.read().await;
        r.get(session_id).cloned().unwrap_or_default()
    }

    /// Replace the session's transcript.
    pub async fn set(&self, session_id: SessionId, history: Vec<Message>) {
        let mut w = self.sessions.write().await;
        w.insert(session_id, history);
    }

    /// Drop the session's transcript at teardown.
    pub async fn remove(&self, session_id: &str) {
        let mut w = self.sessions.write().await;
        w.remove(session_id);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
