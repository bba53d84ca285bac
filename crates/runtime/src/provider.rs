//! OpenAI-compatible chat-completions provider (non-streaming).
//!
//! The driving loop is synchronous request-per-turn: one POST per model
//! round-trip, no streaming, no retries. Works against any endpoint
//! that speaks the chat-completions wire shape.

use anyhow::Result;
use reqwest::{
    Client, Method,
    header::{self, HeaderMap},
};
use serde::Serialize;
use serde_json::{Value, json};
use shoal_core::{Message, Response, Tool, ToolChoice};

/// Default chat-completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// The chat-completions provider.
#[derive(Debug, Clone)]
pub struct Provider {
    client: Client,
    headers: HeaderMap,
    endpoint: String,
    model: String,
}

impl Provider {
    /// Create a provider with bearer auth for the given model.
    pub fn new(client: Client, key: &str, model: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "application/json".parse()?);
        headers.insert(header::ACCEPT, "application/json".parse()?);
        headers.insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        Ok(Self {
            client,
            headers,
            endpoint: DEFAULT_ENDPOINT.into(),
            model: model.into(),
        })
    }

    /// Override the endpoint (compatible gateways, local servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The configured model.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The request headers (bearer auth included).
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Send one chat-completions request.
    pub async fn send(&self, tools: &[Tool], messages: &[Message]) -> Result<Response> {
        let body = Request::new(&self.model, messages, tools);
        tracing::debug!("request: {}", serde_json::to_string(&body)?);

        let response = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(%status, "response: {text}");

        if !status.is_success() {
            anyhow::bail!("chat completion failed ({status}): {text}");
        }
        serde_json::from_str(&text).map_err(Into::into)
    }
}

/// The request body for a chat-completions call.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model we are using
    pub model: String,

    /// The messages to send
    pub messages: Vec<Message>,

    /// A list of tools the model may call
    #[serde(skip_serializing_if = "Value::is_null")]
    pub tools: Value,

    /// Controls which (if any) tool is called by the model
    #[serde(skip_serializing_if = "Value::is_null")]
    pub tool_choice: Value,
}

impl Request {
    /// Build a request; `tool_choice` defaults to `auto` whenever any
    /// tools are attached.
    pub fn new(model: &str, messages: &[Message], tools: &[Tool]) -> Self {
        Self {
            model: model.into(),
            messages: messages.to_vec(),
            tools: serialize_tools(tools),
            tool_choice: if tools.is_empty() {
                Value::Null
            } else {
                tool_choice_value(&ToolChoice::Auto)
            },
        }
    }

    /// Override the tool choice.
    pub fn with_tool_choice(mut self, choice: &ToolChoice) -> Self {
        self.tool_choice = tool_choice_value(choice);
        self
    }
}

/// Wrap tools in the `{"type": "function", "function": ...}` envelope
/// the chat-completions API expects.
fn serialize_tools(tools: &[Tool]) -> Value {
    if tools.is_empty() {
        return Value::Null;
    }
    tools
        .iter()
        .map(|tool| {
            json!({
                "type": "function",
                "function": {
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.parameters,
                    "strict": tool.strict,
                }
            })
        })
        .collect()
}

fn tool_choice_value(choice: &ToolChoice) -> Value {
    match choice {
        ToolChoice::None => json!("none"),
        ToolChoice::Auto => json!("auto"),
        ToolChoice::Required => json!("required"),
        ToolChoice::Function { r#type, function } => json!({
            "type": r#type,
            "function": { "name": function.name },
        }),
    }
}
