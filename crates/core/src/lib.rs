//! Shared types for the shoal agent roster.
//!
//! This crate provides the types used across the runtime and the agent
//! definitions: [`Agent`], [`Tool`], [`ToolCall`], [`Message`],
//! chat-completion [`Response`] shapes, the session [`SharedContext`],
//! and the tagged [`ToolOutput`] a tool handler returns.

pub use {
    agent::{Agent, Instructions},
    context::{ContextUpdates, SharedContext},
    message::{Message, Role},
    outcome::ToolOutput,
    response::{Choice, FinishReason, Response, ResponseMessage, Usage},
    tool::{FunctionCall, Tool, ToolCall, ToolChoice},
};

mod agent;
mod context;
mod message;
mod outcome;
mod response;
mod tool;
