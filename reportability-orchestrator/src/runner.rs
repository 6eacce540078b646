//! Shared per-agent turn runner used by every orchestrator: drives one
//! agent's `invoke_stream`, optionally forwarding its text live to the
//! user and/or persisting it as one combined history entry
//! (`combine_before_adding_to_history`, spec.md §4.6).

use std::sync::Arc;

use futures::StreamExt;
use reportability_agent::{Agent, AgentStreamEvent};
use reportability_core::usage::TokenUsage;
use reportability_tools::RunContext;
use tokio::sync::mpsc;

use crate::delta::AgentDelta;
use crate::deps::OrchestratorDeps;
use crate::history::append_assistant_turn;

/// What one agent turn produced, for callers that need the raw text
/// (knowledge agents' id arrays) in addition to the side effects already
/// applied to the context store.
pub(crate) struct AgentRunResult {
    pub text: String,
    pub usage: TokenUsage,
}

/// Run `agent` to completion, streaming its text fragments.
///
/// - `visible`: forward each `TextDelta` to `tx` as an [`AgentDelta`].
///   Knowledge agents are not visible — their JSON id array is never
///   meant for the user.
/// - `persist_to_history`: once the agent finishes, append its combined
///   text as one history entry. Knowledge agents persist their findings
///   through `knowledge::render_knowledge_turn`'s history-only deltas
///   instead, so they pass `false` here.
///
/// A send failure (the client disconnected) stops forwarding further
/// fragments but the agent still runs to completion so token usage and
/// tool effects are recorded consistently.
pub(crate) async fn run_agent(
    agent: &Arc<Agent<OrchestratorDeps>>,
    deps: &OrchestratorDeps,
    user_content: String,
    tx: &mpsc::Sender<AgentDelta>,
    visible: bool,
    persist_to_history: bool,
) -> AgentRunResult {
    let ctx = RunContext::new(deps.clone(), agent.trace_name.clone());
    let mut stream = Arc::clone(agent).invoke_stream(ctx, user_content).await;
    let mut text = String::new();
    let mut usage = TokenUsage::default();
    let mut send_failed = false;

    while let Some(event) = stream.next().await {
        match event {
            Ok(AgentStreamEvent::TextDelta(fragment)) => {
                text.push_str(&fragment);
                if visible && !send_failed && tx.send(AgentDelta::assistant(fragment)).await.is_err() {
                    send_failed = true;
                }
            }
            Ok(AgentStreamEvent::Done(turn_usage)) => usage += turn_usage,
            Ok(AgentStreamEvent::ToolExecuted { tool_name, success }) => {
                if !success {
                    tracing::warn!(agent = %agent.trace_name, tool = %tool_name, "tool call did not succeed");
                }
            }
            Err(err) => {
                tracing::warn!(agent = %agent.trace_name, error = %err, "agent turn failed");
                break;
            }
        }
    }

    deps.context.lock().append_token_usage(&agent.trace_name, usage);
    if persist_to_history {
        append_assistant_turn(&deps.context, &text);
    }

    AgentRunResult { text, usage }
}
