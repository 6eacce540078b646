//! The agent kernel: an LLM role bound to a fixed instruction string, a
//! tool registry, and a chat backend (spec.md §4.4's C4).
//!
//! Every agent in the roster (Intent, NuregKnowledge,
//! ReportabilityManualKnowledge, Recommendation, Extraction, SingleNRC) is
//! one `Agent<Deps>` value differing only in its instructions, its
//! registered tools, and which of `invoke`/`invoke_stream` the
//! orchestrator calls on it — there is no per-agent subtype.

use std::sync::Arc;

use reportability_core::settings::{ModelSettings, DEFAULT_TEMPERATURE};
use reportability_core::usage::TokenUsage;
use reportability_tools::{RunContext, ToolRegistry};

use crate::backend::{BackendMessage, ChatBackend, ChatCompletionRequest, ToolCallRequest};
use crate::error::AgentError;
use crate::stream::AgentStream;

/// Hard cap on how many times one `invoke`/`invoke_stream` call will let
/// the backend request another round of tool calls before giving up.
/// None of the roster's agents need more than a handful of tool calls in
/// one turn; this is a guard against a misbehaving backend, not a design
/// limit any agent is expected to approach.
pub const MAX_TOOL_TURNS: usize = 8;

/// What one `invoke()` call produced.
#[derive(Debug, Clone)]
pub struct AgentTurnOutcome {
    /// The agent's final text content, if it produced any content (an
    /// agent that called `set_intent` and returned nothing prose-wise
    /// will have `None`).
    pub content: Option<String>,
    /// Combined token usage across every backend call this turn made,
    /// including any intermediate tool-calling rounds.
    pub usage: TokenUsage,
}

/// One bound LLM role: instructions, tools, and a backend to run against.
///
/// `Deps` is the dependency bundle threaded through to every tool call
/// (typically a handle to the request's `ReportabilityContext` plus a
/// search plugin handle).
pub struct Agent<Deps = ()> {
    /// Name surfaced in client-facing contexts, if ever (currently
    /// internal only; kept distinct from `trace_name` because the two
    /// are allowed to diverge, per spec.md §4.4).
    pub display_name: String,
    /// Name used in logs and traces.
    pub trace_name: String,
    /// Fixed system instructions for this role.
    pub instructions: String,
    /// Tools this agent may call.
    pub tool_set: ToolRegistry<Deps>,
    /// The chat-completion backend this agent runs against.
    pub service_binding: Arc<dyn ChatBackend>,
    /// Sampling settings. Deterministic by default (temperature 0.0):
    /// this is an advisory engine, not a creative one.
    pub model_settings: ModelSettings,
}

impl<Deps> Agent<Deps>
where
    Deps: Send + Sync + 'static,
{
    /// Construct an agent with deterministic defaults.
    pub fn new(
        display_name: impl Into<String>,
        trace_name: impl Into<String>,
        instructions: impl Into<String>,
        tool_set: ToolRegistry<Deps>,
        service_binding: Arc<dyn ChatBackend>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            trace_name: trace_name.into(),
            instructions: instructions.into(),
            tool_set,
            service_binding,
            model_settings: ModelSettings::with_temperature(DEFAULT_TEMPERATURE),
        }
    }

    /// Override the default model settings (e.g. to raise `max_tokens`
    /// for a prose-heavy role like Recommendation).
    #[must_use]
    pub fn with_model_settings(mut self, settings: ModelSettings) -> Self {
        self.model_settings = settings;
        self
    }

    fn build_request(&self, history: &[BackendMessage]) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(BackendMessage::System {
            content: self.instructions.clone(),
        });
        messages.extend_from_slice(history);
        ChatCompletionRequest {
            messages,
            tools: self.tool_set.definitions(),
            temperature: self.model_settings.temperature,
            max_tokens: self.model_settings.max_tokens,
        }
    }

    async fn execute_tool_calls(
        &self,
        ctx: &RunContext<Deps>,
        calls: &[ToolCallRequest],
    ) -> Vec<BackendMessage> {
        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            let tool_ctx = ctx.for_tool(call.name.clone(), Some(call.id.clone()));
            let outcome = self
                .tool_set
                .call(&call.name, &tool_ctx, call.arguments.clone())
                .await;
            let content = match outcome {
                Ok(ret) => ret.into_model_facing_string(),
                Err(err) => format!("error: {}", err.message()),
            };
            results.push(BackendMessage::Tool {
                tool_call_id: call.id.clone(),
                content,
            });
        }
        results
    }

    /// Run this agent to completion without streaming: repeatedly hand
    /// tool-call requests back to the backend until it answers with text
    /// and no further tool calls, or the turn limit trips.
    pub async fn invoke(
        &self,
        ctx: &RunContext<Deps>,
        user_content: &str,
    ) -> Result<AgentTurnOutcome, AgentError> {
        let mut history = vec![BackendMessage::User {
            content: user_content.to_string(),
        }];
        let mut total_usage = TokenUsage::default();

        for _ in 0..MAX_TOOL_TURNS {
            let request = self.build_request(&history);
            let response = self
                .service_binding
                .complete(request)
                .await
                .map_err(AgentError::Backend)?;
            total_usage += response.usage;

            if response.tool_calls.is_empty() {
                return Ok(AgentTurnOutcome {
                    content: response.content,
                    usage: total_usage,
                });
            }

            history.push(BackendMessage::Assistant {
                content: response.content,
                tool_calls: response.tool_calls.clone(),
            });
            let tool_results = self.execute_tool_calls(ctx, &response.tool_calls).await;
            history.extend(tool_results);
        }

        Err(AgentError::ToolLoopExceeded(MAX_TOOL_TURNS))
    }

    /// Run this agent with a streamed final turn. Any tool calls the
    /// backend requests along the way are executed and fed back
    /// non-streamed; only the last, tool-free turn is streamed to the
    /// caller, since that is the only content a client ever sees.
    pub async fn invoke_stream(
        self: Arc<Self>,
        ctx: RunContext<Deps>,
        user_content: String,
    ) -> AgentStream
    where
        Deps: 'static,
    {
        AgentStream::spawn(self, ctx, user_content)
    }
}
