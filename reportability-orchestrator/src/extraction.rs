//! Shared Extraction-agent invocation (spec.md §4.5's Extraction row):
//! non-streaming, parses the last assistant content into a JSON array of
//! [`Recommendation`], non-fatal on failure (spec.md §9 open question b).

use std::sync::Arc;

use reportability_agent::Agent;
use reportability_core::recommendation::Recommendation;
use reportability_tools::{RunContext, ToolError};

use crate::deps::OrchestratorDeps;
use crate::history::render_transcript;

/// Run the Extraction agent over the conversation so far and append
/// whatever recommendations it produces. A malformed or non-array
/// response is logged and otherwise ignored — `recommendations` is left
/// unchanged, per the `ExtractionInvalid` error kind's policy.
pub(crate) async fn run_extraction(agent: &Arc<Agent<OrchestratorDeps>>, deps: &OrchestratorDeps) {
    let transcript = render_transcript(&deps.context);
    let ctx = RunContext::new(deps.clone(), agent.trace_name.clone());

    let outcome = match agent.invoke(&ctx, &transcript).await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!(error = %err, "extraction agent turn failed");
            return;
        }
    };
    deps.context.lock().append_token_usage(&agent.trace_name, outcome.usage);

    let content = outcome.content.unwrap_or_default();
    match parse_recommendations(&content) {
        Ok(recommendations) => deps.context.lock().append_recommendations(recommendations),
        Err(err) => {
            tracing::warn!(error = %err, "extraction output invalid; recommendations left unchanged");
        }
    }
}

fn parse_recommendations(content: &str) -> Result<Vec<Recommendation>, ToolError> {
    serde_json::from_str(content.trim()).map_err(|err| ToolError::contract_violation(err.to_string()))
}
