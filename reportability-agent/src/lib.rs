//! # reportability-agent
//!
//! The agent kernel (spec.md §4.4's C4): an LLM role bound to fixed
//! instructions, a [`reportability_tools::ToolRegistry`], and a
//! [`ChatBackend`] service binding, with `invoke()` for a single
//! tool-calling turn and `invoke_stream()` for a streamed one.
//!
//! This crate has no opinion on *which* agents exist or *how* their
//! outputs combine into a response — that is
//! `reportability-orchestrator`'s job. It only knows how to run one
//! agent to completion against one backend.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use reportability_agent::{Agent, ChatBackend};
//! use reportability_tools::{RunContext, ToolRegistry};
//!
//! let agent = Agent::new(
//!     "Intent",
//!     "intent",
//!     "Classify the user's request.",
//!     ToolRegistry::<()>::new(),
//!     backend,
//! );
//! let ctx = RunContext::minimal("intent");
//! let outcome = agent.invoke(&ctx, "Is this reportable?").await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod agent;
pub mod backend;
pub mod error;
pub mod stream;

pub use agent::{Agent, AgentTurnOutcome, MAX_TOOL_TURNS};
pub use backend::{
    BackendMessage, ChatBackend, ChatCompletionRequest, ChatCompletionResponse, ChatStreamEvent,
    ToolCallRequest,
};
pub use error::AgentError;
pub use stream::{AgentStream, AgentStreamEvent};

/// Common imports for building and running agents.
pub mod prelude {
    pub use crate::{
        Agent, AgentError, AgentStream, AgentStreamEvent, AgentTurnOutcome, BackendMessage,
        ChatBackend, ChatCompletionRequest, ChatCompletionResponse, ChatStreamEvent,
        ToolCallRequest,
    };
}
