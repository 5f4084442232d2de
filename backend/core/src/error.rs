use thiserror::Error;

/// Top-level error type for the salamgate runtime.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("missing API credential (set GEMINI_API_KEY)")]
    MissingCredential,

    #[error("model endpoint error ({status}): {message}")]
    Model { status: u16, message: String },

    #[error("model requested unknown tool: {0}")]
    UnknownTool(String),

    #[error("malformed arguments for tool {tool}: {reason}")]
    BadToolArguments { tool: String, reason: String },

    #[error("tool-call step limit ({0}) reached without a final answer")]
    StepLimit(usize),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
