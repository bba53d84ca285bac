//! Tagged tool results.
//!
//! A tool either returns data for the model or names another agent to
//! hand the conversation to. The routing loop branches on the tag —
//! never on runtime type inspection of the payload.

use crate::ContextUpdates;
use serde_json::Value;

/// What a tool handler returns.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Ordinary data, serialized back to the model, plus any shared
    /// context entries the tool wants to establish.
    Data {
        payload: String,
        updates: ContextUpdates,
    },

    /// A hand-off to the named agent. Takes effect after the data
    /// results of the same turn resolve; never shown as chat text.
    HandOff(String),
}

impl ToolOutput {
    /// Data with no context updates.
    pub fn data(payload: impl Into<String>) -> Self {
        Self::Data {
            payload: payload.into(),
            updates: ContextUpdates::new(),
        }
    }

    /// Data serialized from a JSON value.
    pub fn json(value: &Value) -> Self {
        Self::data(value.to_string())
    }

    /// Data plus shared-context updates.
    pub fn data_with(payload: impl Into<String>, updates: ContextUpdates) -> Self {
        Self::Data {
            payload: payload.into(),
            updates,
        }
    }

    /// A hand-off to the named agent.
    pub fn hand_off(agent: impl Into<String>) -> Self {
        Self::HandOff(agent.into())
    }
}
