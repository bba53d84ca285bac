//! Tests for the chat-completions request body and provider headers.

use reqwest::Client;
use shoal_core::{Message, Tool, ToolChoice};
use shoal_runtime::{Provider, Request};

fn echo_tool() -> Tool {
    Tool {
        name: "echo".into(),
        description: "Echoes the input".into(),
        parameters: schemars::schema_for!(String),
        strict: true,
    }
}

#[test]
fn request_wraps_tools_as_functions() {
    let req = Request::new("gpt-4o-mini", &[Message::user("hi")], &[echo_tool()]);
    let body = serde_json::to_value(&req).unwrap();

    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["tools"][0]["type"], "function");
    assert_eq!(body["tools"][0]["function"]["name"], "echo");
    assert_eq!(body["tools"][0]["function"]["strict"], true);
    assert_eq!(body["tool_choice"], "auto");
}

#[test]
fn request_without_tools_omits_tool_fields() {
    let req = Request::new("gpt-4o-mini", &[Message::user("hi")], &[]);
    let body = serde_json::to_value(&req).unwrap();

    assert!(body.get("tools").is_none());
    assert!(body.get("tool_choice").is_none());
}

#[test]
fn request_with_tool_choice_none() {
    let req = Request::new("gpt-4o-mini", &[], &[echo_tool()]).with_tool_choice(&ToolChoice::None);
    let body = serde_json::to_value(&req).unwrap();
    assert_eq!(body["tool_choice"], "none");
}

#[test]
fn request_with_tool_choice_function() {
    let req = Request::new("gpt-4o-mini", &[], &[echo_tool()])
        .with_tool_choice(&ToolChoice::from("echo"));
    let body = serde_json::to_value(&req).unwrap();
    assert_eq!(body["tool_choice"]["type"], "function");
    assert_eq!(body["tool_choice"]["function"]["name"], "echo");
}

#[test]
fn bearer_sets_authorization_header() {
    let provider = Provider::new(Client::new(), "test-key", "gpt-4o-mini").unwrap();
    let auth = provider.headers().get("authorization").unwrap();
    assert_eq!(auth.to_str().unwrap(), "Bearer test-key");
    assert_eq!(provider.endpoint(), shoal_runtime::DEFAULT_ENDPOINT);
}

#[test]
fn endpoint_override() {
    let provider = Provider::new(Client::new(), "k", "m")
        .unwrap()
        .with_endpoint("http://localhost:11434/v1/chat/completions");
    assert_eq!(
        provider.endpoint(),
        "http://localhost:11434/v1/chat/completions"
    );
}
