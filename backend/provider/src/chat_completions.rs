//! Reqwest client for an OpenAI-compatible chat-completions endpoint.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use salamgate_core::{Completion, CompletionRequest, GateError, ModelClient, ToolInvocation};

/// HTTP client for one hosted chat-completions endpoint, bearer-key
/// authenticated. Construction fails without a credential so the
/// process refuses to serve when the key is absent.
pub struct ChatCompletionsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ChatCompletionsClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, GateError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GateError::MissingCredential);
        }
        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into(),
        })
    }
}

#[derive(Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    call_type: String,
    function: WireFunctionCall,
}

#[derive(Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    /// JSON-encoded argument object, as the protocol ships it.
    arguments: String,
}

#[derive(Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: WireFunction,
}

#[derive(Serialize)]
struct WireFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
}

#[derive(Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

fn encode_request(request: &CompletionRequest) -> WireRequest {
    let messages = request
        .messages
        .iter()
        .map(|msg| {
            let tool_calls = msg.tool_call.as_ref().map(|call| {
                vec![WireToolCall {
                    id: call.id.clone(),
                    call_type: "function".to_string(),
                    function: WireFunctionCall {
                        name: call.name.clone(),
                        arguments: call.arguments.to_string(),
                    },
                }]
            });
            WireMessage {
                role: msg.role.as_str(),
                content: if msg.content.is_empty() && tool_calls.is_some() {
                    None
                } else {
                    Some(msg.content.clone())
                },
                tool_calls,
                tool_call_id: msg.tool_call_id.clone(),
            }
        })
        .collect();

    let tools = if request.tools.is_empty() {
        None
    } else {
        Some(
            request
                .tools
                .iter()
                .map(|spec| WireTool {
                    tool_type: "function",
                    function: WireFunction {
                        name: spec.name.clone(),
                        description: spec.description.clone(),
                        parameters: spec.parameters.clone(),
                    },
                })
                .collect(),
        )
    };

    WireRequest {
        model: request.model.clone(),
        messages,
        tools,
    }
}

/// Fold a wire response into the tagged completion variant.
/// A tool call takes precedence over any text content.
fn decode_response(response: WireResponse) -> Result<Completion, GateError> {
    let message = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or_else(|| GateError::Model {
            status: 200,
            message: "response contained no choices".to_string(),
        })?;

    if let Some(call) = message.tool_calls.and_then(|calls| calls.into_iter().next()) {
        let arguments = serde_json::from_str(&call.function.arguments).map_err(|e| {
            GateError::BadToolArguments {
                tool: call.function.name.clone(),
                reason: e.to_string(),
            }
        })?;
        return Ok(Completion::ToolCall(ToolInvocation {
            id: call.id,
            name: call.function.name,
            arguments,
        }));
    }

    Ok(Completion::Text(message.content.unwrap_or_default()))
}

#[async_trait]
impl ModelClient for ChatCompletionsClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GateError> {
        let body = encode_request(request);

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending chat-completions request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("chat-completions HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(GateError::Model {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let wire: WireResponse = response
            .json()
            .await
            .context("failed to parse chat-completions response")?;

        decode_response(wire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salamgate_core::{Message, RequestMessage, ToolSpec};
    use serde_json::json;

    fn request_with(messages: Vec<RequestMessage>, tools: Vec<ToolSpec>) -> CompletionRequest {
        CompletionRequest {
            model: "gemini-2.0-flash".into(),
            messages,
            tools,
        }
    }

    #[test]
    fn test_empty_key_is_rejected() {
        assert!(matches!(
            ChatCompletionsClient::new("", "http://localhost"),
            Err(GateError::MissingCredential)
        ));
        assert!(matches!(
            ChatCompletionsClient::new("   ", "http://localhost"),
            Err(GateError::MissingCredential)
        ));
    }

    #[test]
    fn test_nonempty_key_is_accepted() {
        assert!(ChatCompletionsClient::new("sk-test", "http://localhost").is_ok());
    }

    #[test]
    fn test_encode_request_shape() {
        let req = request_with(
            vec![
                RequestMessage::system("Be brief."),
                (&Message::user("Hi")).into(),
            ],
            vec![ToolSpec {
                name: "get_weather".into(),
                description: "weather".into(),
                parameters: json!({"type": "object"}),
            }],
        );
        let wire = serde_json::to_value(encode_request(&req)).unwrap();
        assert_eq!(wire["model"], "gemini-2.0-flash");
        assert_eq!(wire["messages"][0]["role"], "system");
        assert_eq!(wire["messages"][1]["role"], "user");
        assert_eq!(wire["messages"][1]["content"], "Hi");
        assert_eq!(wire["tools"][0]["type"], "function");
        assert_eq!(wire["tools"][0]["function"]["name"], "get_weather");
    }

    #[test]
    fn test_encode_tool_result_turn() {
        let req = request_with(
            vec![
                RequestMessage::assistant_call(ToolInvocation {
                    id: "call_0".into(),
                    name: "get_weather".into(),
                    arguments: json!({"location": "Rome"}),
                }),
                RequestMessage::tool_result("call_0", "The weather is Rome is 22 degrees C"),
            ],
            vec![],
        );
        let wire = serde_json::to_value(encode_request(&req)).unwrap();
        assert_eq!(wire["messages"][0]["tool_calls"][0]["id"], "call_0");
        assert_eq!(
            wire["messages"][0]["tool_calls"][0]["function"]["arguments"],
            "{\"location\":\"Rome\"}"
        );
        // Content is omitted on the call marker, present on the result.
        assert!(wire["messages"][0].get("content").is_none());
        assert_eq!(wire["messages"][1]["role"], "tool");
        assert_eq!(wire["messages"][1]["tool_call_id"], "call_0");
    }

    #[test]
    fn test_decode_text_completion() {
        let wire: WireResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": "Salam from Mahnoor Khalid"}}]
        }))
        .unwrap();
        match decode_response(wire).unwrap() {
            Completion::Text(text) => assert_eq!(text, "Salam from Mahnoor Khalid"),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_tool_call_takes_precedence() {
        let wire: WireResponse = serde_json::from_value(json!({
            "choices": [{"message": {
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {
                        "name": "get_weather",
                        "arguments": "{\"location\": \"Rome\", \"unit\": \"C\"}"
                    }
                }]
            }}]
        }))
        .unwrap();
        match decode_response(wire).unwrap() {
            Completion::ToolCall(call) => {
                assert_eq!(call.name, "get_weather");
                assert_eq!(call.arguments["location"], "Rome");
            }
            other => panic!("expected tool call, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_malformed_arguments() {
        let wire: WireResponse = serde_json::from_value(json!({
            "choices": [{"message": {
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "get_weather", "arguments": "not json"}
                }]
            }}]
        }))
        .unwrap();
        assert!(matches!(
            decode_response(wire),
            Err(GateError::BadToolArguments { .. })
        ));
    }

    #[test]
    fn test_decode_empty_choices() {
        let wire: WireResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            decode_response(wire),
            Err(GateError::Model { .. })
        ));
    }
}
