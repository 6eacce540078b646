//! # reportability-core
//!
//! Core data model and error handling for the reportability advisory engine.
//!
//! This crate provides the foundational types shared by every other crate in
//! the workspace:
//!
//! - **Messages**: `ChatMessage`, `ChatRequest`, `StreamDelta` — the wire
//!   format for the streaming chat endpoint.
//! - **Documents**: `PluginResult` — the polymorphic search-hit model and
//!   its citation/agent-string rendering.
//! - **Context**: `ReportabilityContext` — per-request mutable state.
//! - **Usage**: per-agent token accounting.
//! - **Errors**: the closed error taxonomy mapped to HTTP status and
//!   `ErrorDelta` codes.
//!
//! ## Feature Flags
//!
//! - `tracing-integration`: emit `tracing` spans/events from context
//!   mutations.
//! - `full`: enable all optional features.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod context;
pub mod document;
pub mod error;
pub mod identifier;
pub mod messages;
pub mod recommendation;
pub mod settings;
pub mod usage;

pub use context::{Intent, ReportabilityContext};
pub use document::{PluginResult, PluginResultKind};
pub use error::{ErrorKind, Result, ReportabilityError};
pub use identifier::{generate_run_id, generate_tool_call_id, now_utc};
pub use messages::{
    ChatFile, ChatMessage, ChatRequest, ChatRole, ContextDelta, DeltaFlags, DocumentRef,
    ErrorDelta, MessageDelta, StreamDelta,
};
pub use recommendation::{Confidence, Recommendation};
pub use settings::ModelSettings;
pub use usage::{TokenUsage, TokenUsageAccumulator};

/// Prelude module for common imports.
///
/// ```rust
/// use reportability_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::context::{Intent, ReportabilityContext};
    pub use crate::document::{PluginResult, PluginResultKind};
    pub use crate::error::{ErrorKind, Result, ReportabilityError};
    pub use crate::identifier::{generate_run_id, generate_tool_call_id, now_utc};
    pub use crate::messages::{
        ChatFile, ChatMessage, ChatRequest, ChatRole, ContextDelta, DeltaFlags, ErrorDelta,
        MessageDelta, StreamDelta,
    };
    pub use crate::recommendation::{Confidence, Recommendation};
    pub use crate::settings::ModelSettings;
    pub use crate::usage::{TokenUsage, TokenUsageAccumulator};
}
