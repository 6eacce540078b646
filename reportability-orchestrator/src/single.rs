//! The Single orchestrator (spec.md §4.6): one agent does search and
//! recommendation in the same turn.

use tokio::sync::mpsc;

use crate::delta::AgentDelta;
use crate::deps::OrchestratorDeps;
use crate::extraction::run_extraction;
use crate::roster::Roster;
use crate::runner::run_agent;

/// Run the Single strategy: stream SingleNRC directly to the user, then —
/// only when `include_eval_content` is set — append its combined text to
/// history and invoke Extraction. Either way, every plugin result the
/// turn collected is marked cited, since one agent saw all of them.
pub(crate) async fn run_single(roster: &Roster, deps: OrchestratorDeps, user_content: String, tx: mpsc::Sender<AgentDelta>) {
    let result = run_agent(&roster.single_nrc, &deps, user_content, &tx, true, false).await;
    let _ = result.usage;

    if deps.context.lock().include_eval_content() {
        crate::history::append_assistant_turn(&deps.context, &result.text);
        run_extraction(&roster.extraction, &deps).await;
    }

    let ids: Vec<String> = deps.context.lock().plugin_results().map(|r| r.id.clone()).collect();
    let mut store = deps.context.lock();
    for id in &ids {
        if let Err(err) = store.mark_cited(id) {
            tracing::warn!(id, error = %err, "failed to mark plugin result cited at end of Single turn");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps::OrchestratorDeps;
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
                content: Some("no concerns".to_string()),
                tool_calls: Vec::new(),
                usage: TokenUsage::default(),
            })
        }

        async fn stream(
            &self,
            _request: ChatCompletionRequest,
        ) -> anyhow::Result<BoxStream<'static, anyhow::Result<ChatStreamEvent>>> {
            Ok(Box::pin(stream::iter(vec![
                Ok(ChatStreamEvent::TextDelta("no concerns".to_string())),
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
    async fn runs_without_extraction_when_eval_content_is_off() {
        let roster = Roster::new(Arc::new(EchoBackend));
        let deps = OrchestratorDeps::new(
            false,
            Arc::new(SearchPlugin::new(Arc::new(EmptyBackend))),
            Arc::new(SearchConfigList::default()),
        );
        let (tx, _rx) = mpsc::channel(8);
        run_single(&roster, deps.clone(), "loose part found".to_string(), tx).await;
        assert!(deps.context.lock().recommendations().is_empty());
    }
}
