use serde::{Deserialize, Serialize};

/// An agent definition: system prompt, model reference, tool names.
///
/// Agents are pure config constructed once at startup. They describe
/// *what* an agent does; the actual tool handlers live in the
/// registry and are resolved by name at run time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDef {
    pub name: String,
    /// System prompt sent to the model ahead of every request.
    pub instructions: String,
    /// Model identifier understood by the hosted endpoint.
    pub model: String,
    /// Names of tools this agent may use.
    pub tools: Vec<String>,
}
