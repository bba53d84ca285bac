//! A conversation session.
//!
//! A [`Session`] is one conversation: the name of the active agent, the
//! shared context, and the message history. At most one agent is active
//! at any instant; a hand-off is a total replacement of the active
//! agent — there is no stack and no return-to-previous semantics.

use shoal_core::{Agent, Message, SharedContext};

/// One conversation: active agent, shared context, history.
#[derive(Debug, Clone)]
pub struct Session {
    active: String,
    /// Session-scoped shared context, visible to every agent's
    /// instruction template and extended by tool results.
    pub context: SharedContext,
    /// Conversation history (system prompts are rendered per turn and
    /// never stored).
    pub messages: Vec<Message>,
}

impl Session {
    /// Start a session with the given entry agent and context.
    pub fn new(agent: impl Into<String>, context: SharedContext) -> Self {
        Self {
            active: agent.into(),
            context,
            messages: Vec::new(),
        }
    }

    /// The name of the active agent.
    pub fn active(&self) -> &str {
        &self.active
    }

    /// Replace the active agent. The shared context is untouched.
    pub(crate) fn replace_active(&mut self, target: String) {
        self.active = target;
    }

    /// Build the message list for one model request: the active
    /// agent's instructions rendered against the current context,
    /// followed by the history.
    pub(crate) fn api_messages(&self, agent: &Agent) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.push(Message::system(agent.prompt(&self.context)));
        messages.extend(self.messages.iter().cloned());
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shoal_core::Role;

    #[test]
    fn replace_active_keeps_context() {
        let mut ctx = SharedContext::new();
        ctx.set("user_info", json!("alice"));
        let mut session = Session::new("triage", ctx);

        session.replace_active("sql_executor".into());
        assert_eq!(session.active(), "sql_executor");
        assert_eq!(session.context.describe("user_info").as_deref(), Some("alice"));
    }

    #[test]
    fn api_messages_render_instructions_per_turn() {
        let agent = Agent::new("triage").instructions(|ctx| {
            format!("known: {}", ctx.describe("user_info").unwrap_or_default())
        });

        let mut session = Session::new("triage", SharedContext::new());
        session.messages.push(Message::user("hello"));

        let before = session.api_messages(&agent);
        assert_eq!(before[0].role, Role::System);
        assert_eq!(before[0].content, "known: ");

        session.context.set("user_info", json!("alice"));
        let after = session.api_messages(&agent);
        assert_eq!(after[0].content, "known: alice");
        assert_eq!(after[1].content, "hello");
    }
}
