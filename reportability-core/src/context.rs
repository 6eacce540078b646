//! The per-request context store (C3): the single mutable state shared
//! by every agent and tool call within one orchestrator run.
//!
//! Wrapped by callers in `Arc<parking_lot::Mutex<ReportabilityContext>>`
//! (SPEC_FULL.md §4.3) so that concurrently-running agents in the
//! Concurrent orchestrator still serialize their tool-call writes through
//! a single owner.

use indexmap::IndexMap;
use serde::Serialize;

use crate::document::PluginResult;
use crate::error::{ReportabilityError, Result};
use crate::messages::ChatMessage;
use crate::recommendation::Recommendation;
use crate::usage::{TokenUsage, TokenUsageAccumulator};

/// Whether the request has been classified as in-scope for reportability
/// advice. Set once by the Intent agent's `set_intent` tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Not yet classified.
    #[default]
    Unset,
    /// The request is a reportability question; the roster proceeds.
    Reportability,
    /// The request is out of scope; the orchestrator short-circuits.
    Invalid,
}

/// Request-scoped mutable state threaded through every agent and tool
/// call for one orchestrator run.
///
/// Invariants enforced by this type (spec.md §3):
/// 1. No two entries in `plugin_results` share an `id`.
/// 2. `cited` on a plugin result only ever transitions `false` → `true`.
/// 3. Token usage is recorded once per backend response — see
///    [`TokenUsageAccumulator::record`].
/// 4. `message_history` is append-only.
#[derive(Debug, Clone, Default)]
pub struct ReportabilityContext {
    /// Append-only conversation log, including agent-internal turns not
    /// necessarily surfaced to the client.
    message_history: Vec<ChatMessage>,
    /// All search hits seen so far this request, keyed by id, in
    /// first-seen order. Serves as the cross-agent de-duplication
    /// registry (spec.md §4.2).
    plugin_results: IndexMap<String, PluginResult>,
    /// Intent classification.
    intent: Intent,
    /// Whether the orchestrator determined it needs another turn of user
    /// input before it can proceed (e.g. Intent asked a clarifying
    /// question).
    user_input_needed: bool,
    /// Recommendations produced by the Extraction agent, if any.
    recommendations: Vec<Recommendation>,
    /// Per-agent token usage for this request.
    token_usage: TokenUsageAccumulator,
    /// Whether eval-mode document metadata (`search_type`, `search_query`,
    /// `cited`) should be included in the final `ContextDelta`.
    include_eval_content: bool,
}

impl ReportabilityContext {
    /// A fresh context for a new request.
    pub fn new(include_eval_content: bool) -> Self {
        Self {
            include_eval_content,
            ..Self::default()
        }
    }

    /// Append a message to the history. Append-only: there is no removal
    /// or mutation operation.
    pub fn append_message(&mut self, message: ChatMessage) {
        self.message_history.push(message);
    }

    /// The conversation so far, oldest first.
    pub fn message_history(&self) -> &[ChatMessage] {
        &self.message_history
    }

    /// Register a freshly-retrieved search hit. Returns an error if a
    /// result with the same id was already registered this request,
    /// enforcing invariant 1 — callers that want "first write wins,
    /// silently skip duplicates" should check [`Self::has_result`] first
    /// (this is the de-duplication policy the search plugin layer uses).
    pub fn register_plugin_result(&mut self, result: PluginResult) -> Result<()> {
        if self.plugin_results.contains_key(&result.id) {
            return Err(ReportabilityError::Fatal(anyhow::anyhow!(
                "plugin result id '{}' registered twice",
                result.id
            )));
        }
        self.plugin_results.insert(result.id.clone(), result);
        Ok(())
    }

    /// Whether a plugin result with this id has already been seen this
    /// request.
    pub fn has_result(&self, id: &str) -> bool {
        self.plugin_results.contains_key(id)
    }

    /// All plugin results seen so far, in first-seen order.
    pub fn plugin_results(&self) -> impl Iterator<Item = &PluginResult> {
        self.plugin_results.values()
    }

    /// Mark a plugin result as cited. A no-op if it is already cited
    /// (invariant 2: the flag only ever moves `false` → `true`). Returns
    /// an error if no result with that id was registered.
    pub fn mark_cited(&mut self, id: &str) -> Result<()> {
        let result = self.plugin_results.get_mut(id).ok_or_else(|| {
            ReportabilityError::ToolContractViolation {
                tool: "citation".to_string(),
                detail: format!("cited unknown plugin result id '{id}'"),
            }
        })?;
        result.cited = true;
        Ok(())
    }

    /// Record one backend response's token usage against an agent name.
    pub fn append_token_usage(&mut self, agent_name: &str, usage: TokenUsage) {
        self.token_usage.record(agent_name, usage);
    }

    /// Accumulated token usage so far.
    pub fn token_usage(&self) -> &TokenUsageAccumulator {
        &self.token_usage
    }

    /// Current intent classification.
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// Set the intent classification. Called once by the Intent agent's
    /// `set_intent` tool.
    pub fn set_intent(&mut self, intent: Intent) {
        self.intent = intent;
    }

    /// Whether the orchestrator needs another turn of user input before
    /// it can proceed.
    pub fn user_input_needed(&self) -> bool {
        self.user_input_needed
    }

    /// Mark that the orchestrator needs another turn of user input.
    pub fn set_user_input_needed(&mut self, needed: bool) {
        self.user_input_needed = needed;
    }

    /// Append recommendations produced by the Extraction agent.
    pub fn append_recommendations(&mut self, mut recommendations: Vec<Recommendation>) {
        self.recommendations.append(&mut recommendations);
    }

    /// Recommendations accumulated so far.
    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// Whether eval-mode document metadata should ride along in the
    /// final `ContextDelta`.
    pub fn include_eval_content(&self) -> bool {
        self.include_eval_content
    }
}
