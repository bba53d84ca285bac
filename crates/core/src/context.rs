//! Session-scoped shared context.
//!
//! One [`SharedContext`] is created per session and carried across every
//! tool call and every hand-off. Tools extend it through the updates on
//! [`ToolOutput::Data`](crate::ToolOutput); nothing ever removes a key.

use serde_json::Value;
use std::collections::BTreeMap;

/// Updates a tool returns alongside its payload.
pub type ContextUpdates = BTreeMap<String, Value>;

/// The key/value data visible to every agent's instruction template.
///
/// Lives for the session, discarded at process exit. The routing loop is
/// the only writer, so no interior mutability is needed.
#[derive(Debug, Clone, Default)]
pub struct SharedContext {
    values: BTreeMap<String, Value>,
}

impl SharedContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Look up a string value, rendering non-strings through `to_string`.
    pub fn describe(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Set a single key.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Merge tool-returned updates. Keys are only ever added or
    /// overwritten, never removed.
    pub fn merge(&mut self, updates: ContextUpdates) {
        self.values.extend(updates);
    }

    /// Whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate over the entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}
