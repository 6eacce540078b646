//! Shared post-processing for the two knowledge agents (spec.md §4.5): an
//! agent's raw turn returns a JSON array of plugin-result ids; this turns
//! that into the Reviewed/Citing delta sequence and marks citations in
//! the context store.

use reportability_agent::AgentTurnOutcome;
use reportability_tools::ToolError;

use crate::delta::AgentDelta;
use crate::deps::ContextHandle;

/// Parse a knowledge agent's completed turn and emit the deltas spec.md
/// §4.5 describes: a user-visible, history-excluded "Reviewed" line per
/// id present in the context's plugin results, followed for each of those
/// by a "Citing" line plus the result's full agent string recorded into
/// history only. Marks each present id's result as cited.
///
/// A turn whose content isn't a JSON array of strings is a
/// [`reportability_core::error::ReportabilityError::ToolContractViolation`]-shaped
/// failure per the error taxonomy: no effect, a warning is logged, and an
/// empty delta list is returned so the orchestrator proceeds unaffected.
pub fn render_knowledge_turn(context: &ContextHandle, agent_name: &str, outcome: &AgentTurnOutcome) -> Vec<AgentDelta> {
    let ids = match parse_id_array(outcome.content.as_deref().unwrap_or("")) {
        Ok(ids) => ids,
        Err(err) => {
            tracing::warn!(agent = agent_name, error = %err, "knowledge agent did not return a JSON array of ids");
            return Vec::new();
        }
    };

    let mut deltas = Vec::new();
    let mut store = context.lock();
    for id in &ids {
        if !store.has_result(id) {
            continue;
        }
        let (display_value, url, agent_string) = {
            let result = store
                .plugin_results()
                .find(|r| &r.id == id)
                .expect("has_result confirmed presence");
            (result.display_value(), result.resolve_url(), result.agent_string())
        };
        deltas.push(AgentDelta::ephemeral(format!("Reviewed [{display_value}]({url})\n")));
        if let Err(err) = store.mark_cited(id) {
            tracing::warn!(agent = agent_name, id, error = %err, "failed to mark plugin result cited");
            continue;
        }
        deltas.push(AgentDelta::ephemeral(format!("Citing [{display_value}]({url})\n")));
        deltas.push(AgentDelta::history_only(agent_string));
    }
    deltas
}

fn parse_id_array(content: &str) -> Result<Vec<String>, ToolError> {
    let value: serde_json::Value =
        serde_json::from_str(content.trim()).map_err(|err| ToolError::contract_violation(err.to_string()))?;
    let array = value
        .as_array()
        .ok_or_else(|| ToolError::contract_violation("expected a JSON array of ids"))?;
    array
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| ToolError::contract_violation("expected array of string ids"))
        })
        .collect()
}
