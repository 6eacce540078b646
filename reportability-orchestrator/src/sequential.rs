//! The Sequential orchestrator (spec.md §4.6): Intent gates the rest of
//! the roster, then ReportabilityManualKnowledge, NuregKnowledge, and
//! Recommendation run one after another, each behind its own engaging
//! header, and Extraction always runs last.

use std::sync::Arc;

use reportability_agent::Agent;
use reportability_core::context::Intent;
use tokio::sync::mpsc;

use crate::delta::AgentDelta;
use crate::deps::OrchestratorDeps;
use crate::extraction::run_extraction;
use crate::history::render_transcript;
use crate::knowledge::render_knowledge_turn;
use crate::roster::Roster;
use crate::runner::run_agent;

/// Run the Sequential strategy.
pub(crate) async fn run_sequential(roster: &Roster, deps: OrchestratorDeps, user_content: String, tx: mpsc::Sender<AgentDelta>) {
    run_agent(&roster.intent, &deps, user_content, &tx, true, true).await;

    if deps.context.lock().intent() == Intent::Invalid {
        return;
    }

    if !engage(&roster.reportability_manual_knowledge, &deps, &tx, false).await {
        run_extraction(&roster.extraction, &deps).await;
        return;
    }
    if !engage(&roster.nureg_knowledge, &deps, &tx, false).await {
        run_extraction(&roster.extraction, &deps).await;
        return;
    }
    engage(&roster.recommendation, &deps, &tx, true).await;

    run_extraction(&roster.extraction, &deps).await;
}

/// Emit the engaging header, run one roster agent with the transcript so
/// far as its input, and — for knowledge agents — post-process its id
/// array into Reviewed/Citing deltas. Returns `false` if the turn set
/// `user_input_needed`, signalling the caller to stop before the next
/// agent.
async fn engage(agent: &Arc<Agent<OrchestratorDeps>>, deps: &OrchestratorDeps, tx: &mpsc::Sender<AgentDelta>, visible: bool) -> bool {
    let _ = tx
        .send(AgentDelta::ephemeral(format!("## Engaging {}\n\n", agent.display_name)).flushing())
        .await;

    let transcript = render_transcript(&deps.context);
    let result = run_agent(agent, deps, transcript, tx, visible, visible).await;

    if !visible {
        let outcome = reportability_agent::AgentTurnOutcome {
            content: Some(result.text),
            usage: result.usage,
        };
        for delta in render_knowledge_turn(&deps.context, &agent.trace_name, &outcome) {
            if tx.send(delta).await.is_err() {
                break;
            }
        }
    }

    !deps.context.lock().user_input_needed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportability_search::{SearchConfigList, SearchPlugin};
    use std::sync::Arc;

    use async_trait::async_trait;
    use futures::stream::{self, BoxStream};
    use reportability_agent::{ChatBackend, ChatCompletionRequest, ChatCompletionResponse, ChatStreamEvent};
    use reportability_core::usage::TokenUsage;
    use reportability_search::{SearchBackend, SearchHit, SearchIndexConfig};

    struct InvalidIntentBackend;

    #[async_trait]
    impl ChatBackend for InvalidIntentBackend {
        async fn complete(&self, _request: ChatCompletionRequest) -> anyhow::Result<ChatCompletionResponse> {
            Ok(ChatCompletionResponse {
                content: Some("I can only help with reportability questions.".to_string()),
                tool_calls: vec![reportability_agent::ToolCallRequest {
                    id: "call-1".to_string(),
                    name: "set_intent".to_string(),
                    arguments: serde_json::json!({"intent": "invalid"}),
                }],
                usage: TokenUsage::default(),
            })
        }

        async fn stream(
            &self,
            request: ChatCompletionRequest,
        ) -> anyhow::Result<BoxStream<'static, anyhow::Result<ChatStreamEvent>>> {
            if request.messages.iter().any(|m| matches!(m, reportability_agent::BackendMessage::Tool { .. })) {
                return Ok(Box::pin(stream::iter(vec![
                    Ok(ChatStreamEvent::TextDelta("I can only help with reportability questions.".to_string())),
                    Ok(ChatStreamEvent::Done(TokenUsage::default())),
                ])));
            }
            Ok(Box::pin(stream::iter(vec![Ok(ChatStreamEvent::ToolCallComplete(
                reportability_agent::ToolCallRequest {
                    id: "call-1".to_string(),
                    name: "set_intent".to_string(),
                    arguments: serde_json::json!({"intent": "invalid"}),
                },
            ))])))
        }
    }

    struct EmptyBackend;

    #[async_trait]
    impl SearchBackend for EmptyBackend {
        async fn query(&self, _config: &SearchIndexConfig, _query_text: &str) -> anyhow::Result<Vec<SearchHit>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn invalid_intent_short_circuits_before_knowledge_agents() {
        let roster = Roster::new(Arc::new(InvalidIntentBackend));
        let deps = OrchestratorDeps::new(
            false,
            Arc::new(SearchPlugin::new(Arc::new(EmptyBackend))),
            Arc::new(SearchConfigList::default()),
        );
        let (tx, _rx) = mpsc::channel(16);
        run_sequential(&roster, deps.clone(), "what's the weather".to_string(), tx).await;
        assert_eq!(deps.context.lock().intent(), Intent::Invalid);
        assert!(deps.context.lock().recommendations().is_empty());
    }
}
