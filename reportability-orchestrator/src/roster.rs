//! Concrete agent constructors for the fixed roster (spec.md §4.5): one
//! `Agent<OrchestratorDeps>` per row, differing only in instructions and
//! registered tools.

use std::sync::Arc;

use reportability_agent::{Agent, ChatBackend};
use reportability_tools::ToolRegistry;

use crate::deps::OrchestratorDeps;
use crate::tools::{SearchTool, SetIntentTool};

const NUREG_INDEX: &str = "nureg";
const MANUAL_INDEX: &str = "reportability_manual";

fn nureg_search_tool() -> SearchTool {
    SearchTool::new(
        "search_nureg",
        NUREG_INDEX,
        "Search NUREG-0000 series guidance for sections relevant to the described event.",
    )
}

fn manual_search_tool() -> SearchTool {
    SearchTool::new(
        "search_reportability_manual",
        MANUAL_INDEX,
        "Search the plant's reportability manual for sections relevant to the described event.",
    )
}

/// Classifies the user's turn as `reportability` or `invalid`; gates
/// whether the rest of the roster runs at all.
pub fn intent_agent(backend: Arc<dyn ChatBackend>) -> Agent<OrchestratorDeps> {
    let mut tools = ToolRegistry::new();
    tools.register(SetIntentTool);
    Agent::new(
        "Intent Agent",
        "intent",
        "Decide whether the user is describing a plant event and asking whether it is \
         reportable under NRC regulations, or something else entirely. Call set_intent with \
         'reportability' for the former and 'invalid' for the latter. If invalid, reply with a \
         brief, polite explanation that you can only help with reportability questions.",
        tools,
        backend,
    )
}

/// Searches the NUREG index and returns a JSON array of relevant result ids.
pub fn nureg_knowledge_agent(backend: Arc<dyn ChatBackend>) -> Agent<OrchestratorDeps> {
    let mut tools = ToolRegistry::new();
    tools.register(nureg_search_tool());
    Agent::new(
        "NUREG 1022 Knowledge Agent",
        "nureg_knowledge",
        "Search the NUREG index for sections relevant to the described event using \
         search_nureg. When you are done searching, reply with nothing but a JSON array of the \
         ids of every result you found relevant, e.g. [\"doc-1\",\"doc-2\"]. Reply with [] if \
         none are relevant.",
        tools,
        backend,
    )
}

/// Searches the reportability-manual index and returns a JSON array of
/// relevant result ids.
pub fn reportability_manual_knowledge_agent(backend: Arc<dyn ChatBackend>) -> Agent<OrchestratorDeps> {
    let mut tools = ToolRegistry::new();
    tools.register(manual_search_tool());
    Agent::new(
        "Reportability Manual Knowledge Agent",
        "reportability_manual_knowledge",
        "Search the plant's reportability manual for sections relevant to the described event \
         using search_reportability_manual. When you are done searching, reply with nothing but \
         a JSON array of the ids of every result you found relevant, e.g. [\"doc-1\",\"doc-2\"]. \
         Reply with [] if none are relevant.",
        tools,
        backend,
    )
}

/// Consumes the accumulated chat history, including the knowledge agents'
/// appended findings, and produces the user-visible recommendation prose.
/// Has no tools of its own.
pub fn recommendation_agent(backend: Arc<dyn ChatBackend>) -> Agent<OrchestratorDeps> {
    Agent::new(
        "Recommendation Agent",
        "recommendation",
        "Using the event description and the knowledge agents' cited findings already in this \
         conversation, write a clear recommendation for the operator: which regulations likely \
         apply, your confidence in each, and your reasoning. Write for a plant operator, not a \
         regulator.",
        ToolRegistry::new(),
        backend,
    )
}

/// Non-streaming; parses the last assistant message into a JSON array of
/// [`reportability_core::Recommendation`]. Has no tools of its own.
pub fn extraction_agent(backend: Arc<dyn ChatBackend>) -> Agent<OrchestratorDeps> {
    Agent::new(
        "Extraction Agent",
        "extraction",
        "Read the recommendation prose above and emit nothing but a JSON array of objects, each \
         shaped {\"regulationName\": string, \"confidenceScore\": string|number, \"reasoning\": \
         string}, one per distinct regulation discussed. Emit [] if no regulation was \
         recommended.",
        ToolRegistry::new(),
        backend,
    )
}

/// Used only by the Single orchestrator: performs search and
/// recommendation in one turn, with both knowledge indexes' search tools
/// available at once.
pub fn single_nrc_agent(backend: Arc<dyn ChatBackend>) -> Agent<OrchestratorDeps> {
    let mut tools = ToolRegistry::new();
    tools.register(nureg_search_tool());
    tools.register(manual_search_tool());
    Agent::new(
        "SingleNRC Agent",
        "single_nrc",
        "Using search_nureg and search_reportability_manual as needed, research the described \
         event and then write a clear recommendation for the operator: which regulations likely \
         apply, your confidence in each, and your reasoning.",
        tools,
        backend,
    )
}

/// The complete fixed agent roster (spec.md §4.5), built once per process
/// around one shared [`ChatBackend`] and reused across every request —
/// agents carry no per-request mutable state of their own, only
/// instructions and a tool registry.
pub struct Roster {
    /// Classifies the user's turn.
    pub intent: Arc<Agent<OrchestratorDeps>>,
    /// Searches the NUREG index.
    pub nureg_knowledge: Arc<Agent<OrchestratorDeps>>,
    /// Searches the reportability-manual index.
    pub reportability_manual_knowledge: Arc<Agent<OrchestratorDeps>>,
    /// Produces user-visible recommendation prose.
    pub recommendation: Arc<Agent<OrchestratorDeps>>,
    /// Parses recommendation prose into structured recommendations.
    pub extraction: Arc<Agent<OrchestratorDeps>>,
    /// Single orchestrator's combined search+recommend agent.
    pub single_nrc: Arc<Agent<OrchestratorDeps>>,
}

impl Roster {
    /// Build every roster agent around one shared backend.
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            intent: Arc::new(intent_agent(Arc::clone(&backend))),
            nureg_knowledge: Arc::new(nureg_knowledge_agent(Arc::clone(&backend))),
            reportability_manual_knowledge: Arc::new(reportability_manual_knowledge_agent(Arc::clone(&backend))),
            recommendation: Arc::new(recommendation_agent(Arc::clone(&backend))),
            extraction: Arc::new(extraction_agent(Arc::clone(&backend))),
            single_nrc: Arc::new(single_nrc_agent(backend)),
        }
    }
}
