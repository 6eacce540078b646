//! The Concurrent orchestrator (spec.md §4.6): the two knowledge agents
//! run as parallel tasks fanning into one shared delta stream, with
//! per-source exception isolation, before Recommendation and Extraction
//! run sequentially.

use tokio::sync::mpsc;

use crate::delta::AgentDelta;
use crate::deps::OrchestratorDeps;
use crate::extraction::run_extraction;
use crate::history::render_transcript;
use crate::knowledge::render_knowledge_turn;
use crate::roster::Roster;
use crate::runner::run_agent;

/// Run the Concurrent strategy.
pub(crate) async fn run_concurrent(roster: &Roster, deps: OrchestratorDeps, user_content: String, tx: mpsc::Sender<AgentDelta>) {
    run_agent(&roster.intent, &deps, user_content, &tx, true, true).await;

    if deps.context.lock().intent() == reportability_core::context::Intent::Invalid {
        return;
    }

    let _ = tx.send(AgentDelta::ephemeral("## Engaging knowledge sources\n\n").flushing()).await;

    let manual_deps = deps.clone();
    let manual_tx = tx.clone();
    let manual_agent = std::sync::Arc::clone(&roster.reportability_manual_knowledge);
    let manual_transcript = render_transcript(&deps.context);
    let manual_task = tokio::spawn(async move {
        run_one_knowledge_agent(&manual_agent, &manual_deps, manual_transcript, &manual_tx).await;
    });

    let nureg_deps = deps.clone();
    let nureg_tx = tx.clone();
    let nureg_agent = std::sync::Arc::clone(&roster.nureg_knowledge);
    let nureg_transcript = render_transcript(&deps.context);
    let nureg_task = tokio::spawn(async move {
        run_one_knowledge_agent(&nureg_agent, &nureg_deps, nureg_transcript, &nureg_tx).await;
    });

    // Per-source exception isolation (spec.md §4.6 step 3): a panicking
    // task is logged and the other source's findings still stand. Neither
    // joins the other's result, so there is no shared failure path.
    if let Err(err) = manual_task.await {
        tracing::warn!(source = "reportability_manual_knowledge", error = %err, "knowledge source task failed");
    }
    if let Err(err) = nureg_task.await {
        tracing::warn!(source = "nureg_knowledge", error = %err, "knowledge source task failed");
    }

    run_agent(&roster.recommendation, &deps, render_transcript(&deps.context), &tx, true, true).await;
    run_extraction(&roster.extraction, &deps).await;
}

async fn run_one_knowledge_agent(
    agent: &std::sync::Arc<reportability_agent::Agent<OrchestratorDeps>>,
    deps: &OrchestratorDeps,
    transcript: String,
    tx: &mpsc::Sender<AgentDelta>,
) {
    let result = run_agent(agent, deps, transcript, tx, false, false).await;
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

    struct EchoBackend;

    #[async_trait]
    impl ChatBackend for EchoBackend {
        async fn complete(&self, _request: ChatCompletionRequest) -> anyhow::Result<ChatCompletionResponse> {
            Ok(ChatCompletionResponse {
                content: Some("[]".to_string()),
                tool_calls: Vec::new(),
                usage: TokenUsage::default(),
            })
        }

        async fn stream(
            &self,
            _request: ChatCompletionRequest,
        ) -> anyhow::Result<BoxStream<'static, anyhow::Result<ChatStreamEvent>>> {
            Ok(Box::pin(stream::iter(vec![
                Ok(ChatStreamEvent::TextDelta("[]".to_string())),
                Ok(ChatStreamEvent::Done(TokenUsage::default())),
            ])))
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
    async fn both_knowledge_sources_run_and_recommendation_follows() {
        let roster = Roster::new(Arc::new(EchoBackend));
        let deps = OrchestratorDeps::new(
            false,
            Arc::new(SearchPlugin::new(Arc::new(EmptyBackend))),
            Arc::new(SearchConfigList::default()),
        );
        deps.context.lock().set_intent(reportability_core::context::Intent::Reportability);
        let (tx, _rx) = mpsc::channel(32);
        run_concurrent(&roster, deps.clone(), "loose part found".to_string(), tx).await;
        assert!(deps.context.lock().plugin_results().next().is_none());
    }
}
