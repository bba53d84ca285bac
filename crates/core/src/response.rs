//! Chat-completion response shapes (OpenAI-compatible, non-streaming).

use crate::{Message, Role, ToolCall};
use serde::Deserialize;

/// A chat completion response from the model
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    /// A unique identifier for the chat completion
    #[serde(default)]
    pub id: String,

    /// The model used for the completion
    #[serde(default)]
    pub model: String,

    /// The list of completion choices
    pub choices: Vec<Choice>,

    /// Token usage statistics
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl Response {
    /// Get the first choice as an assistant [`Message`].
    pub fn message(&self) -> Option<Message> {
        let choice = self.choices.first()?;
        Some(Message {
            role: Role::Assistant,
            content: choice.message.content.clone().unwrap_or_default(),
            tool_call_id: String::new(),
            tool_calls: choice.message.tool_calls.clone().unwrap_or_default(),
        })
    }

    /// Get the first message's text content
    pub fn content(&self) -> Option<&String> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
    }
}

/// A completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The message generated by the model
    pub message: ResponseMessage,

    /// Why the model stopped generating
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

/// Message content in a completion response
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ResponseMessage {
    /// The role of the message author
    pub role: Option<Role>,

    /// The content of the message
    pub content: Option<String>,

    /// Tool calls made by the model
    pub tool_calls: Option<Vec<ToolCall>>,
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop
    Stop,
    /// Token limit reached
    Length,
    /// The model wants tool calls dispatched
    ToolCalls,
    /// Content filtered by the provider
    ContentFilter,
}

/// Token usage statistics
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Usage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u64,

    /// Tokens in the completion
    #[serde(default)]
    pub completion_tokens: u64,

    /// Total tokens used
    #[serde(default)]
    pub total_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "id": "chatcmpl-1",
        "model": "gpt-4o-mini",
        "choices": [{
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "list_projects", "arguments": "{}"}
                }]
            },
            "finish_reason": "tool_calls"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    }"#;

    #[test]
    fn deserializes_tool_call_response() {
        let response: Response = serde_json::from_str(RESPONSE).unwrap();
        let message = response.message().unwrap();
        assert_eq!(message.tool_calls.len(), 1);
        assert_eq!(message.tool_calls[0].function.name, "list_projects");
        assert_eq!(
            response.choices[0].finish_reason,
            Some(FinishReason::ToolCalls)
        );
    }

    #[test]
    fn content_absent_on_tool_call_turn() {
        let response: Response = serde_json::from_str(RESPONSE).unwrap();
        assert!(response.content().is_none());
    }
}
