use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GateError;
use crate::message::{Message, Role};

/// A capability the model may request to be invoked mid-conversation.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name of the tool (e.g., "get_weather").
    fn name(&self) -> &str;

    /// Description for the model prompt.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's parameters.
    fn parameters(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: serde_json::Value) -> Result<String>;
}

/// Advertisement of a tool sent to the model alongside a request.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

impl ToolSpec {
    pub fn of(tool: &dyn Tool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            parameters: tool.parameters(),
        }
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Call id assigned by the model, echoed back with the result.
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// One message in a completion request.
///
/// Richer than the stored [`Message`]: tool-call markers and tool
/// results carry extra wire metadata that never enters a transcript.
#[derive(Debug, Clone)]
pub struct RequestMessage {
    pub role: Role,
    pub content: String,
    /// Set on the assistant turn that requested a tool call.
    pub tool_call: Option<ToolInvocation>,
    /// Set on a tool-result turn, echoing the call id.
    pub tool_call_id: Option<String>,
}

impl RequestMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            tool_call: None,
            tool_call_id: None,
        }
    }

    /// Assistant turn echoing a tool call back to the model.
    pub fn assistant_call(call: ToolInvocation) -> Self {
        Self {
            role: Role::Assistant,
            content: String::new(),
            tool_call: Some(call),
            tool_call_id: None,
        }
    }

    /// Tool-result turn for a previously requested call.
    pub fn tool_result(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_call: None,
            tool_call_id: Some(call_id.into()),
        }
    }
}

impl From<&Message> for RequestMessage {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
            tool_call: None,
            tool_call_id: None,
        }
    }
}

/// A unified chat-completions request: model, messages, tool specs.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<RequestMessage>,
    pub tools: Vec<ToolSpec>,
}

/// The model's answer to a completion request.
///
/// Pattern-matched by the runner; a completion is either final text
/// or a request to invoke a local tool.
#[derive(Debug, Clone)]
pub enum Completion {
    Text(String),
    ToolCall(ToolInvocation),
}

/// Client for one hosted chat-completions endpoint.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Endpoint name for logging (e.g., "gemini", "mock").
    fn name(&self) -> &str;

    /// Submit a completion request and return the model's answer.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GateError>;
}
