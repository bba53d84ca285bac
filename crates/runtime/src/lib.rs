//! The shoal runtime: tool routing and agent hand-off.
//!
//! The [`Runtime`] holds the tool handlers and the agent registry. One
//! conversational turn resolves to zero or more ordinary tool results
//! and at most one terminal hand-off: a tool whose result names another
//! agent, which replaces the active agent for subsequent turns while
//! the shared context carries forward unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use shoal_core::{Agent, Message, ToolOutput};
//! use shoal_runtime::{Provider, Runtime, Session};
//!
//! let mut runtime = Runtime::new();
//! runtime.register(list_tool(), |_args, _ctx| async move {
//!     Ok(ToolOutput::data("[]"))
//! });
//! runtime.add_agent(Agent::new("triage").tool("list_projects"));
//!
//! let mut session = Session::new("triage", context);
//! let reply = runtime.send(&provider, &mut session, Message::user("hi")).await?;
//! ```

pub use provider::{DEFAULT_ENDPOINT, Provider, Request};
pub use session::Session;

mod provider;
mod session;

use anyhow::Result;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use shoal_core::{Agent, Message, SharedContext, Tool, ToolCall, ToolOutput};
use std::{collections::BTreeMap, future::Future, pin::Pin, sync::Arc};

/// Upper bound on model/tool round-trips within one user turn.
pub const MAX_TOOL_CALLS: usize = 16;

/// A type-erased async tool handler.
///
/// Receives the raw argument JSON and a snapshot of the shared context;
/// returns a tagged [`ToolOutput`]. An `Err` is not recovered here — it
/// propagates out of the dispatch to the driving loop.
pub type Handler = Arc<
    dyn Fn(String, SharedContext) -> Pin<Box<dyn Future<Output = Result<ToolOutput>> + Send>>
        + Send
        + Sync,
>;

/// The outcome of dispatching one model turn's tool calls.
#[derive(Debug, Default)]
pub struct Dispatch {
    /// Tool-role result messages, in request order.
    pub results: Vec<Message>,
    /// The hand-off to apply, if any. When several calls in one turn
    /// hand off, the last one wins.
    pub hand_off: Option<String>,
}

/// The tool and agent registries.
///
/// Agents are constructed in one place and registered here; hand-off
/// targets are plain agent names, so there is no construction-order
/// coupling between agents that reference each other.
#[derive(Default)]
pub struct Runtime {
    tools: BTreeMap<String, (Tool, Handler)>,
    agents: BTreeMap<String, Agent>,
}

impl Runtime {
    /// Create an empty runtime.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent.
    pub fn add_agent(&mut self, agent: Agent) {
        self.agents.insert(agent.name.clone(), agent);
    }

    /// Get a registered agent by name.
    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.get(name)
    }

    /// Register a tool with a raw handler.
    pub fn register<F, Fut>(&mut self, tool: Tool, handler: F)
    where
        F: Fn(String, SharedContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ToolOutput>> + Send + 'static,
    {
        let name = tool.name.clone();
        let handler: Handler = Arc::new(move |args, ctx| Box::pin(handler(args, ctx)));
        self.tools.insert(name, (tool, handler));
    }

    /// Register a tool with typed parameters.
    ///
    /// Arguments are validated by deserializing into `P` before the
    /// handler runs; a missing or malformed parameter rejects the
    /// invocation with a model-facing message and the handler is never
    /// executed.
    pub fn register_typed<P, F, Fut>(&mut self, tool: Tool, handler: F)
    where
        P: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(P, SharedContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ToolOutput>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        self.register(tool, move |args, ctx| {
            let handler = Arc::clone(&handler);
            async move {
                let raw = if args.trim().is_empty() {
                    "{}"
                } else {
                    args.as_str()
                };
                match serde_json::from_str::<P>(raw) {
                    Ok(params) => handler(params, ctx).await,
                    Err(e) => Ok(ToolOutput::data(format!("invalid arguments: {e}"))),
                }
            }
        });
    }

    /// Resolve tool schemas for the given tool names.
    pub fn resolve(&self, names: &[String]) -> Vec<Tool> {
        names
            .iter()
            .filter_map(|name| self.tools.get(name.as_str()).map(|(tool, _)| tool.clone()))
            .collect()
    }

    /// Dispatch one model turn's tool calls for the active agent.
    ///
    /// Calls execute in request order. A call naming a tool outside the
    /// active agent's allow-list (or not registered at all) produces a
    /// model-facing rejection instead of executing. Context updates
    /// from data results merge into `context` immediately; a hand-off
    /// is recorded and applied by the caller after the whole turn
    /// resolves. Handler errors propagate — no retry, no recovery.
    pub async fn dispatch(
        &self,
        active: &Agent,
        calls: &[ToolCall],
        context: &mut SharedContext,
    ) -> Result<Dispatch> {
        let mut dispatch = Dispatch::default();

        for call in calls {
            let name = call.function.name.as_str();

            let handler = if active.allows(name) {
                self.tools.get(name).map(|(_, handler)| handler)
            } else {
                None
            };
            let Some(handler) = handler else {
                tracing::warn!(tool = name, agent = %active.name, "tool not available");
                dispatch.results.push(Message::tool(
                    format!("function {name} not available"),
                    call.id.clone(),
                ));
                continue;
            };

            tracing::debug!(tool = name, agent = %active.name, "dispatching tool call");
            match handler(call.function.arguments.clone(), context.clone()).await? {
                ToolOutput::Data { payload, updates } => {
                    context.merge(updates);
                    dispatch
                        .results
                        .push(Message::tool(payload, call.id.clone()));
                }
                ToolOutput::HandOff(target) => {
                    if !self.agents.contains_key(&target) {
                        anyhow::bail!("hand-off to unknown agent '{target}'");
                    }
                    tracing::info!(from = %active.name, to = %target, "hand-off");
                    dispatch.results.push(Message::tool(
                        format!("transferred to {target}"),
                        call.id.clone(),
                    ));
                    dispatch.hand_off = Some(target);
                }
            }
        }

        Ok(dispatch)
    }

    /// Send a message through a session (non-streaming).
    ///
    /// Each iteration re-renders the active agent's instructions
    /// against the shared context and re-resolves its allow-list, so a
    /// hand-off takes full effect on the very next model round-trip.
    pub async fn send(
        &self,
        provider: &Provider,
        session: &mut Session,
        message: Message,
    ) -> Result<shoal_core::Response> {
        session.messages.push(message);

        for _ in 0..MAX_TOOL_CALLS {
            let agent = self
                .agents
                .get(session.active())
                .ok_or_else(|| anyhow::anyhow!("agent '{}' not registered", session.active()))?;
            let tools = self.resolve(&agent.tools);
            let messages = session.api_messages(agent);

            let response = provider.send(&tools, &messages).await?;
            let Some(message) = response.message() else {
                return Ok(response);
            };

            if message.tool_calls.is_empty() {
                session.messages.push(message);
                return Ok(response);
            }

            let result = self
                .dispatch(agent, &message.tool_calls, &mut session.context)
                .await?;
            session.messages.push(message);
            session.messages.extend(result.results);

            // Total replacement of the active agent, not a stack push.
            if let Some(target) = result.hand_off {
                session.replace_active(target);
            }
        }

        anyhow::bail!("max tool calls reached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::schema_for;
    use serde::Deserialize;
    use serde_json::json;
    use shoal_core::FunctionCall;

    #[derive(JsonSchema, Deserialize)]
    struct EchoParams {
        text: String,
    }

    fn tool(name: &str) -> Tool {
        Tool {
            name: name.into(),
            description: format!("The {name} tool"),
            parameters: schema_for!(EchoParams),
            strict: false,
        }
    }

    fn call(name: &str, id: &str, arguments: &str) -> ToolCall {
        ToolCall {
            id: id.into(),
            call_type: "function".into(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    fn runtime_with_echo() -> (Runtime, Agent) {
        let mut rt = Runtime::new();
        rt.register(tool("echo"), |args, _ctx| async move {
            Ok(ToolOutput::data(format!("echo: {args}")))
        });
        let agent = Agent::new("triage").tool("echo");
        rt.add_agent(agent.clone());
        (rt, agent)
    }

    #[tokio::test]
    async fn dispatch_runs_calls_in_request_order() {
        let (rt, agent) = runtime_with_echo();
        let mut ctx = SharedContext::new();
        let calls = [call("echo", "c1", "one"), call("echo", "c2", "two")];

        let dispatch = rt.dispatch(&agent, &calls, &mut ctx).await.unwrap();
        assert_eq!(dispatch.results.len(), 2);
        assert_eq!(dispatch.results[0].content, "echo: one");
        assert_eq!(dispatch.results[0].tool_call_id, "c1");
        assert_eq!(dispatch.results[1].content, "echo: two");
        assert!(dispatch.hand_off.is_none());
    }

    #[tokio::test]
    async fn dispatch_rejects_tool_outside_allow_list() {
        let mut rt = Runtime::new();
        rt.register(tool("execute_sql"), |_, _| async move {
            Ok(ToolOutput::data("ran"))
        });
        // Registered in the runtime, but not allowed for this agent.
        let agent = Agent::new("triage").tool("echo");
        rt.add_agent(agent.clone());

        let mut ctx = SharedContext::new();
        let calls = [call("execute_sql", "c1", "{}")];
        let dispatch = rt.dispatch(&agent, &calls, &mut ctx).await.unwrap();
        assert_eq!(
            dispatch.results[0].content,
            "function execute_sql not available"
        );
    }

    #[tokio::test]
    async fn dispatch_rejects_unknown_tool() {
        let (rt, agent) = runtime_with_echo();
        let mut ctx = SharedContext::new();
        let agent = agent.tool("missing");
        let calls = [call("missing", "c1", "{}")];
        let dispatch = rt.dispatch(&agent, &calls, &mut ctx).await.unwrap();
        assert_eq!(dispatch.results[0].content, "function missing not available");
    }

    #[tokio::test]
    async fn last_hand_off_wins_and_data_still_resolves() {
        let mut rt = Runtime::new();
        rt.register(tool("echo"), |args, _| async move {
            Ok(ToolOutput::data(format!("echo: {args}")))
        });
        rt.register(tool("transfer_a"), |_, _| async move {
            Ok(ToolOutput::hand_off("a"))
        });
        rt.register(tool("transfer_b"), |_, _| async move {
            Ok(ToolOutput::hand_off("b"))
        });
        rt.add_agent(Agent::new("a"));
        rt.add_agent(Agent::new("b"));
        let agent = Agent::new("triage")
            .tool("echo")
            .tool("transfer_a")
            .tool("transfer_b");
        rt.add_agent(agent.clone());

        let mut ctx = SharedContext::new();
        let calls = [
            call("transfer_a", "c1", ""),
            call("echo", "c2", "data"),
            call("transfer_b", "c3", ""),
        ];
        let dispatch = rt.dispatch(&agent, &calls, &mut ctx).await.unwrap();

        assert_eq!(dispatch.hand_off.as_deref(), Some("b"));
        assert_eq!(dispatch.results.len(), 3);
        assert_eq!(dispatch.results[1].content, "echo: data");
        // The hand-off acknowledgement is a tool-role message, never
        // assistant text.
        assert_eq!(dispatch.results[0].role, shoal_core::Role::Tool);
        assert_eq!(dispatch.results[0].content, "transferred to a");
    }

    #[tokio::test]
    async fn hand_off_to_unknown_agent_is_an_error() {
        let mut rt = Runtime::new();
        rt.register(tool("transfer_x"), |_, _| async move {
            Ok(ToolOutput::hand_off("ghost"))
        });
        let agent = Agent::new("triage").tool("transfer_x");
        rt.add_agent(agent.clone());

        let mut ctx = SharedContext::new();
        let calls = [call("transfer_x", "c1", "")];
        assert!(rt.dispatch(&agent, &calls, &mut ctx).await.is_err());
    }

    #[tokio::test]
    async fn dispatch_merges_context_updates() {
        let mut rt = Runtime::new();
        rt.register(tool("get_uri"), |_, _| async move {
            let mut updates = shoal_core::ContextUpdates::new();
            updates.insert("connection_uri".into(), json!("postgres://x"));
            Ok(ToolOutput::data_with("uri fetched", updates))
        });
        let agent = Agent::new("triage").tool("get_uri");
        rt.add_agent(agent.clone());

        let mut ctx = SharedContext::new();
        let calls = [call("get_uri", "c1", "{}")];
        rt.dispatch(&agent, &calls, &mut ctx).await.unwrap();
        assert_eq!(ctx.describe("connection_uri").as_deref(), Some("postgres://x"));
    }

    #[tokio::test]
    async fn handler_error_propagates() {
        let mut rt = Runtime::new();
        rt.register(tool("boom"), |_, _| async move {
            Err(anyhow::anyhow!("database unreachable"))
        });
        let agent = Agent::new("triage").tool("boom");
        rt.add_agent(agent.clone());

        let mut ctx = SharedContext::new();
        let calls = [call("boom", "c1", "{}")];
        let err = rt.dispatch(&agent, &calls, &mut ctx).await.unwrap_err();
        assert!(err.to_string().contains("database unreachable"));
    }

    #[tokio::test]
    async fn typed_registration_rejects_bad_arguments() {
        let mut rt = Runtime::new();
        rt.register_typed(tool("echo"), |params: EchoParams, _ctx| async move {
            Ok(ToolOutput::data(params.text))
        });
        let agent = Agent::new("triage").tool("echo");
        rt.add_agent(agent.clone());
        let mut ctx = SharedContext::new();

        // Missing required field: rejected, handler not executed.
        let calls = [call("echo", "c1", r#"{"wrong": 1}"#)];
        let dispatch = rt.dispatch(&agent, &calls, &mut ctx).await.unwrap();
        assert!(dispatch.results[0].content.starts_with("invalid arguments:"));

        // Well-formed arguments run the handler.
        let calls = [call("echo", "c2", r#"{"text": "hi"}"#)];
        let dispatch = rt.dispatch(&agent, &calls, &mut ctx).await.unwrap();
        assert_eq!(dispatch.results[0].content, "hi");
    }

    #[test]
    fn resolve_skips_unknown() {
        let (rt, _) = runtime_with_echo();
        let tools = rt.resolve(&["echo".into(), "missing".into()]);
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "echo");
    }
}
