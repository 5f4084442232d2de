//! The conversation runner: one turn against the hosted model.

use std::sync::Arc;

use tracing::{debug, info, warn};

use salamgate_core::{
    AgentDef, Completion, CompletionRequest, GateError, Message, ModelClient, RequestMessage,
};
use salamgate_tools::ToolRegistry;

use crate::context_window::clamp_context;

/// Runs a single conversation turn: instructions + history in, one
/// final assistant message out. Tool calls requested by the model are
/// executed locally and resubmitted; the tool exchange never enters
/// the caller's history.
pub struct Runner {
    client: Arc<dyn ModelClient>,
    registry: Arc<ToolRegistry>,
    /// Max messages from history submitted per request.
    context_window: usize,
    /// Bound on the tool-call loop.
    max_steps: usize,
}

impl Runner {
    pub fn new(client: Arc<dyn ModelClient>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            client,
            registry,
            context_window: 40,
            max_steps: 4,
        }
    }

    pub fn with_context_window(mut self, max_messages: usize) -> Self {
        self.context_window = max_messages;
        self
    }

    /// Run one turn for the given agent over the full prior history.
    pub async fn run(&self, agent: &AgentDef, history: &[Message]) -> Result<Message, GateError> {
        let tools = self.registry.resolve(&agent.tools);

        let mut messages: Vec<RequestMessage> =
            Vec::with_capacity(history.len().min(self.context_window) + 1);
        messages.push(RequestMessage::system(&agent.instructions));
        messages.extend(
            clamp_context(history, self.context_window)
                .iter()
                .map(RequestMessage::from),
        );

        for step in 0..self.max_steps {
            let request = CompletionRequest {
                model: agent.model.clone(),
                messages: messages.clone(),
                tools: tools.clone(),
            };

            debug!(
                agent = %agent.name,
                provider = self.client.name(),
                step,
                "Submitting completion request"
            );

            match self.client.complete(&request).await? {
                Completion::Text(text) => {
                    return Ok(Message::assistant(text));
                }
                Completion::ToolCall(call) => {
                    info!(tool = %call.name, call_id = %call.id, "Model requested tool");
                    let tool = self
                        .registry
                        .get(&call.name)
                        .ok_or_else(|| GateError::UnknownTool(call.name.clone()))?;
                    let result = tool
                        .execute(call.arguments.clone())
                        .await
                        .map_err(|e| GateError::BadToolArguments {
                            tool: call.name.clone(),
                            reason: e.to_string(),
                        })?;
                    messages.push(RequestMessage::assistant_call(call.clone()));
                    messages.push(RequestMessage::tool_result(call.id, result));
                }
            }
        }

        warn!(limit = self.max_steps, "Tool-call step limit reached");
        Err(GateError::StepLimit(self.max_steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salamgate_core::{Role, ToolInvocation};
    use salamgate_provider::MockModelClient;
    use salamgate_tools::WeatherTool;
    use serde_json::json;

    fn registry() -> Arc<ToolRegistry> {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(WeatherTool));
        Arc::new(registry)
    }

    fn weather_call(id: &str, location: &str) -> Completion {
        Completion::ToolCall(ToolInvocation {
            id: id.into(),
            name: "get_weather".into(),
            arguments: json!({ "location": location }),
        })
    }

    #[tokio::test]
    async fn test_text_completion_becomes_assistant_message() {
        let mock = Arc::new(MockModelClient::new().push_text("Salam from Mahnoor Khalid"));
        let runner = Runner::new(mock.clone(), registry());
        let agent = crate::greeting_agent("gemini-2.0-flash");

        let reply = runner.run(&agent, &[Message::user("Hi")]).await.unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "Salam from Mahnoor Khalid");

        // Request carried the system prompt, the history, and the tool spec.
        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[0].role, Role::System);
        assert_eq!(requests[0].messages[1].content, "Hi");
        assert_eq!(requests[0].tools.len(), 1);
        assert_eq!(requests[0].tools[0].name, "get_weather");
    }

    #[tokio::test]
    async fn test_tool_call_is_executed_and_resubmitted() {
        let mock = Arc::new(
            MockModelClient::new()
                .push(weather_call("call_0", "Rome"))
                .push_text("It's 22 degrees C in Rome."),
        );
        let runner = Runner::new(mock.clone(), registry());
        let agent = crate::greeting_agent("gemini-2.0-flash");

        let reply = runner
            .run(&agent, &[Message::user("What's the weather in Rome?")])
            .await
            .unwrap();
        assert_eq!(reply.content, "It's 22 degrees C in Rome.");

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        let second = &requests[1];
        // The resubmission carries the call marker and the tool result.
        let marker = &second.messages[second.messages.len() - 2];
        assert_eq!(marker.role, Role::Assistant);
        assert_eq!(marker.tool_call.as_ref().unwrap().name, "get_weather");
        let result = second.messages.last().unwrap();
        assert_eq!(result.role, Role::Tool);
        assert_eq!(result.tool_call_id.as_deref(), Some("call_0"));
        assert_eq!(result.content, "The weather is Rome is 22 degrees C");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error() {
        let mock = Arc::new(MockModelClient::new().push(Completion::ToolCall(ToolInvocation {
            id: "call_0".into(),
            name: "launch_rockets".into(),
            arguments: json!({}),
        })));
        let runner = Runner::new(mock, registry());
        let agent = crate::greeting_agent("gemini-2.0-flash");

        let err = runner.run(&agent, &[Message::user("hm")]).await.unwrap_err();
        assert!(matches!(err, GateError::UnknownTool(name) if name == "launch_rockets"));
    }

    #[tokio::test]
    async fn test_bad_tool_arguments_surface() {
        let mock = Arc::new(MockModelClient::new().push(Completion::ToolCall(ToolInvocation {
            id: "call_0".into(),
            name: "get_weather".into(),
            arguments: json!({ "unit": "F" }), // missing location
        })));
        let runner = Runner::new(mock, registry());
        let agent = crate::greeting_agent("gemini-2.0-flash");

        let err = runner.run(&agent, &[Message::user("weather?")]).await.unwrap_err();
        assert!(matches!(err, GateError::BadToolArguments { .. }));
    }

    #[tokio::test]
    async fn test_step_limit_bounds_tool_loop() {
        let mut mock = MockModelClient::new();
        for i in 0..8 {
            mock = mock.push(weather_call(&format!("call_{i}"), "Rome"));
        }
        let runner = Runner::new(Arc::new(mock), registry());
        let agent = crate::greeting_agent("gemini-2.0-flash");

        let err = runner.run(&agent, &[Message::user("weather?")]).await.unwrap_err();
        assert!(matches!(err, GateError::StepLimit(_)));
    }

    #[tokio::test]
    async fn test_context_window_clamps_submitted_history() {
        let mock = Arc::new(MockModelClient::new().push_text("ok"));
        let runner = Runner::new(mock.clone(), registry()).with_context_window(2);
        let agent = crate::greeting_agent("gemini-2.0-flash");

        let history = vec![
            Message::user("one"),
            Message::assistant("two"),
            Message::user("three"),
        ];
        runner.run(&agent, &history).await.unwrap();

        let requests = mock.requests();
        // System prompt plus the clamped tail.
        assert_eq!(requests[0].messages.len(), 3);
        assert_eq!(requests[0].messages[1].content, "two");
        assert_eq!(requests[0].messages[2].content, "three");
    }
}
