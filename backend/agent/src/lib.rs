//! Conversation runner: system prompt assembly, context clamping,
//! the tool-call loop, and per-session transcript storage.

pub mod agent_def;
pub mod context_window;
pub mod runner;
pub mod session_store;

pub use agent_def::greeting_agent;
pub use context_window::clamp_context;
pub use runner::Runner;
pub use session_store::{SessionId, SessionStore};
