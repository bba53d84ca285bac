//! Agent configuration.
//!
//! An [`Agent`] is pure config — name, instructions generator, and tool
//! names. Tool handlers live in the runtime. Agents are immutable once
//! constructed: switching agents means swapping which one is active,
//! never mutating one in place.

use crate::SharedContext;
use std::sync::Arc;

/// Generates the system prompt an agent shows the model this turn.
///
/// Instructions are a pure function of the shared context, so prompts
/// can interpolate session state (user profile, project list, connection
/// URI) without the agent itself holding any mutable state.
pub type Instructions = Arc<dyn Fn(&SharedContext) -> String + Send + Sync>;

/// An agent configuration.
///
/// Agents are portable configs: they describe *what* an agent does
/// but not *how* tool calls are dispatched. The runtime holds the
/// actual tool handlers.
#[derive(Clone)]
pub struct Agent {
    /// Agent identifier (used as the hand-off target name).
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// System prompt generator, evaluated against the shared context.
    pub instructions: Instructions,
    /// Names of tools this agent may call (resolved by the runtime).
    pub tools: Vec<String>,
}

impl Agent {
    /// Create a new agent with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            instructions: Arc::new(|_| String::new()),
            tools: Vec::new(),
        }
    }

    /// Set the instructions generator.
    pub fn instructions<F>(mut self, f: F) -> Self
    where
        F: Fn(&SharedContext) -> String + Send + Sync + 'static,
    {
        self.instructions = Arc::new(f);
        self
    }

    /// Set a fixed system prompt, ignoring the shared context.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        let prompt = prompt.into();
        self.instructions = Arc::new(move |_| prompt.clone());
        self
    }

    /// Set the description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Add a tool by name. Duplicate names are ignored so the
    /// allow-list stays unique and ordered.
    pub fn tool(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.tools.iter().any(|t| *t == name) {
            self.tools.push(name);
        }
        self
    }

    /// Whether this agent is allowed to call the named tool.
    pub fn allows(&self, tool: &str) -> bool {
        self.tools.iter().any(|t| t == tool)
    }

    /// Render the system prompt for the current shared context.
    pub fn prompt(&self, context: &SharedContext) -> String {
        (self.instructions)(context)
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("tools", &self.tools)
            .finish()
    }
}
