//! Core tool trait.
//!
//! Every tool an agent can call — `set_intent`, the per-index search
//! tools, the `SingleNRC` agent's combined search+recommend surface — is
//! a concrete type implementing [`Tool`], registered once into that
//! agent's [`crate::registry::ToolRegistry`] (spec.md §9's "reimplement
//! as an explicit tool registry" redesign note).

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::{definition::ToolDefinition, return_types::ToolResult, RunContext};

/// Core trait for all tools.
///
/// # Type Parameters
///
/// - `Deps`: the dependencies a tool needs to act — typically the
///   shared context store handle and a search plugin handle.
#[async_trait]
pub trait Tool<Deps = ()>: Send + Sync {
    /// The tool's definition: name, description, and parameter schema,
    /// as sent to the chat backend.
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool with the given arguments.
    async fn call(&self, ctx: &RunContext<Deps>, args: JsonValue) -> ToolResult;

    /// The tool name, as declared by [`Tool::definition`].
    fn name(&self) -> String {
        self.definition().name.clone()
    }

    /// The tool description, as declared by [`Tool::definition`].
    fn description(&self) -> String {
        self.definition().description.clone()
    }
}

/// Type-erased, shareable tool handle stored in a [`crate::registry::ToolRegistry`].
pub type BoxedTool<Deps> = Arc<dyn Tool<Deps>>;
