//! Concrete tool implementations: `set_intent` and the per-index search
//! tools (spec.md §4.5's roster table).

use std::collections::HashSet;

use async_trait::async_trait;
use reportability_core::context::Intent;
use reportability_tools::{RunContext, SchemaBuilder, Tool, ToolDefinition, ToolError, ToolResult, ToolReturn};

use crate::deps::OrchestratorDeps;

/// The Intent agent's single tool: classify the user's turn.
pub struct SetIntentTool;

#[async_trait]
impl Tool<OrchestratorDeps> for SetIntentTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "set_intent",
            "Classify the user's request as a reportability question or out of scope.",
        )
        .with_parameters(
            SchemaBuilder::new()
                .enum_values(
                    "intent",
                    "Either 'reportability' if the user is describing an event and asking whether it is reportable, or 'invalid' otherwise.",
                    &["reportability", "invalid"],
                    true,
                )
                .build()
                .expect("SchemaBuilder JSON serialization failed"),
        )
    }

    async fn call(&self, ctx: &RunContext<OrchestratorDeps>, args: serde_json::Value) -> ToolResult {
        let intent_str = args["intent"]
            .as_str()
            .ok_or_else(|| ToolError::invalid_args("missing required field 'intent'"))?;
        let intent = match intent_str {
            "reportability" => Intent::Reportability,
            "invalid" => Intent::Invalid,
            other => {
                return Err(ToolError::invalid_args(format!(
                    "unknown intent value '{other}'"
                )))
            }
        };
        ctx.deps.context.lock().set_intent(intent);
        Ok(ToolReturn::text(intent_str))
    }
}

/// One named index's search tool. Registered once per knowledge/SingleNRC
/// agent with a different `index_logical_name` and `param_description`.
pub struct SearchTool {
    index_logical_name: String,
    tool_name: String,
    description: String,
}

impl SearchTool {
    /// Build a search tool bound to one logical index.
    pub fn new(
        tool_name: impl Into<String>,
        index_logical_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            index_logical_name: index_logical_name.into(),
            tool_name: tool_name.into(),
            description: description.into(),
        }
    }
}

#[async_trait]
impl Tool<OrchestratorDeps> for SearchTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.tool_name.clone(), self.description.clone()).with_parameters(
            SchemaBuilder::new()
                .string(
                    "search_query",
                    "The query text to search this index with.",
                    true,
                )
                .build()
                .expect("SchemaBuilder JSON serialization failed"),
        )
    }

    async fn call(&self, ctx: &RunContext<OrchestratorDeps>, args: serde_json::Value) -> ToolResult {
        let query = args["search_query"]
            .as_str()
            .ok_or_else(|| ToolError::invalid_args("missing required field 'search_query'"))?;
        if query.trim().is_empty() {
            return Err(ToolError::invalid_args("search_query must not be empty"));
        }

        let config = ctx
            .deps
            .search_config
            .get(&self.index_logical_name)
            .ok_or_else(|| {
                ToolError::not_found(format!(
                    "no search configuration for index '{}'",
                    self.index_logical_name
                ))
            })?
            .clone();

        let already_seen: HashSet<String> = {
            let store = ctx.deps.context.lock();
            store.plugin_results().map(|r| r.id.clone()).collect()
        };

        let results = ctx
            .deps
            .search
            .search(&self.index_logical_name, &config, query, |id| {
                already_seen.contains(id)
            })
            .await
            .map_err(|err| ToolError::execution_failed(err.to_string()))?;

        let mut ids = Vec::with_capacity(results.len());
        {
            let mut store = ctx.deps.context.lock();
            for result in results {
                ids.push(result.id.clone());
                if let Err(err) = store.register_plugin_result(result) {
                    tracing::warn!(tool = %self.tool_name, error = %err, "dropping duplicate search hit");
                }
            }
        }

        Ok(ToolReturn::json(serde_json::json!(ids)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reportability_search::{SearchBackend, SearchConfigList, SearchHit, SearchIndexConfig, SearchPlugin};
    use std::sync::Arc;

    struct EmptyBackend;

    #[async_trait]
    impl SearchBackend for EmptyBackend {
        async fn query(&self, _config: &SearchIndexConfig, _query_text: &str) -> anyhow::Result<Vec<SearchHit>> {
            Ok(vec![])
        }
    }

    fn minimal_deps() -> OrchestratorDeps {
        OrchestratorDeps::new(
            false,
            Arc::new(SearchPlugin::new(Arc::new(EmptyBackend))),
            Arc::new(SearchConfigList::default()),
        )
    }

    #[tokio::test]
    async fn set_intent_writes_to_the_context_store() {
        let deps = minimal_deps();
        let ctx = RunContext::new(deps.clone(), "intent");
        SetIntentTool
            .call(&ctx, serde_json::json!({"intent": "reportability"}))
            .await
            .unwrap();
        assert_eq!(deps.context.lock().intent(), Intent::Reportability);
    }

    #[tokio::test]
    async fn set_intent_rejects_unknown_values() {
        let deps = minimal_deps();
        let ctx = RunContext::new(deps, "intent");
        let result = SetIntentTool
            .call(&ctx, serde_json::json!({"intent": "banana"}))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn search_tool_errors_on_unknown_index() {
        let deps = minimal_deps();
        let ctx = RunContext::new(deps, "nureg_knowledge");
        let tool = SearchTool::new("search_nureg", "nureg", "Search NUREG");
        let result = tool.call(&ctx, serde_json::json!({"search_query": "loss of coolant"})).await;
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }
}
