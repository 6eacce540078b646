//! Run context for tool execution.
//!
//! Carries the dependencies a tool needs to do its work (most commonly an
//! `Arc<parking_lot::Mutex<ReportabilityContext>>` and a `SearchPlugin`)
//! plus run metadata. Trimmed from the original's generic retry-tracking,
//! partial-output, and usage-carrying context: this workspace has no
//! tool-level retry strategy (spec.md's error table swallows or logs
//! rather than retries) and usage is recorded by the agent kernel after
//! a backend call completes, not by the context a tool call receives.

use chrono::{DateTime, Utc};
use reportability_core::identifier::generate_run_id;
use reportability_core::settings::ModelSettings;
use std::sync::Arc;

/// Context passed to tools during execution.
#[derive(Debug, Clone)]
pub struct RunContext<Deps = ()> {
    /// User-provided dependencies (search plugin handle, context store
    /// handle, etc.).
    pub deps: Arc<Deps>,

    /// Identifier of the orchestrator run this tool call belongs to.
    pub run_id: String,

    /// When this run started.
    pub start_time: DateTime<Utc>,

    /// Name of the tool being called, once dispatch has started.
    pub tool_name: Option<String>,

    /// Tool call id assigned by the backend, once dispatch has started.
    pub tool_call_id: Option<String>,

    /// Name of the agent invoking this tool.
    pub model_name: String,

    /// Model settings in effect for this run.
    pub model_settings: ModelSettings,

    /// Custom metadata, unused by any tool in this roster today but kept
    /// as an escape hatch the way the teacher's context carries one.
    pub metadata: Option<serde_json::Value>,
}

impl<Deps> RunContext<Deps> {
    /// Create a new run context.
    #[must_use]
    pub fn new(deps: Deps, model_name: impl Into<String>) -> Self {
        Self::from_arc(Arc::new(deps), model_name)
    }

    /// Create a context from existing Arc'd deps.
    #[must_use]
    pub fn from_arc(deps: Arc<Deps>, model_name: impl Into<String>) -> Self {
        Self {
            deps,
            run_id: generate_run_id(),
            start_time: Utc::now(),
            tool_name: None,
            tool_call_id: None,
            model_name: model_name.into(),
            model_settings: ModelSettings::default(),
            metadata: None,
        }
    }

    /// Set the run ID.
    #[must_use]
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = run_id.into();
        self
    }

    /// Set model settings.
    #[must_use]
    pub fn with_model_settings(mut self, settings: ModelSettings) -> Self {
        self.model_settings = settings;
        self
    }

    /// Set metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Create a child context scoped to one tool call.
    #[must_use]
    pub fn for_tool(&self, tool_name: impl Into<String>, tool_call_id: Option<String>) -> Self {
        Self {
            deps: Arc::clone(&self.deps),
            run_id: self.run_id.clone(),
            start_time: self.start_time,
            tool_name: Some(tool_name.into()),
            tool_call_id,
            model_name: self.model_name.clone(),
            model_settings: self.model_settings.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Elapsed time since the run started.
    #[must_use]
    pub fn elapsed(&self) -> chrono::Duration {
        Utc::now() - self.start_time
    }

    /// Whether this context is currently scoped to a tool call.
    #[must_use]
    pub fn in_tool_call(&self) -> bool {
        self.tool_name.is_some()
    }
}

impl<Deps: Default> Default for RunContext<Deps> {
    fn default() -> Self {
        Self::new(Deps::default(), "default")
    }
}

impl RunContext<()> {
    /// Create a minimal context without dependencies, used in tests.
    #[must_use]
    pub fn minimal(model_name: impl Into<String>) -> Self {
        Self::new((), model_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct TestDeps {
        value: i32,
    }

    #[test]
    fn run_context_carries_deps_and_model_name() {
        let ctx = RunContext::new(TestDeps { value: 42 }, "intent");
        assert_eq!(ctx.deps.value, 42);
        assert_eq!(ctx.model_name, "intent");
        assert!(ctx.run_id.starts_with("run_"));
    }

    #[test]
    fn for_tool_shares_deps_and_run_id_but_sets_tool_identity() {
        let ctx = RunContext::new(TestDeps { value: 10 }, "nureg_knowledge");
        let tool_ctx = ctx.for_tool("search_nureg", Some("call_1".to_string()));
        assert_eq!(tool_ctx.deps.value, 10);
        assert_eq!(tool_ctx.run_id, ctx.run_id);
        assert_eq!(tool_ctx.tool_name, Some("search_nureg".to_string()));
        assert!(tool_ctx.in_tool_call());
    }

    #[test]
    fn minimal_context_has_no_dependencies() {
        let ctx = RunContext::minimal("test");
        assert_eq!(ctx.model_name, "test");
    }
}
