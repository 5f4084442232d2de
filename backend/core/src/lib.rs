pub mod error;
pub mod message;
pub mod traits;
pub mod types;

pub use error::GateError;
pub use message::{Message, Role};
pub use traits::{
    Completion, CompletionRequest, ModelClient, RequestMessage, Tool, ToolInvocation, ToolSpec,
};
pub use types::AgentDef;
