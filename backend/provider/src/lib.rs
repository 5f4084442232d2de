//! Model client adapter for one hosted chat-completions endpoint.

pub mod chat_completions;
pub mod mock;

pub use chat_completions::ChatCompletionsClient;
pub use mock::MockModelClient;
