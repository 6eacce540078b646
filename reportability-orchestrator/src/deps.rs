//! The dependency bundle every roster tool and agent call receives.

use std::sync::Arc;

use parking_lot::Mutex;
use reportability_core::context::ReportabilityContext;
use reportability_search::{SearchConfigList, SearchPlugin};

/// Handle to the single per-request context store, shared by the
/// orchestrator task and every tool call it drives — including the two
/// concurrently-running knowledge agents in the Concurrent orchestrator
/// (SPEC_FULL.md §4.3). `parking_lot::Mutex` because every critical
/// section here is synchronous map/vec manipulation with no `.await`
/// inside the guard.
pub type ContextHandle = Arc<Mutex<ReportabilityContext>>;

/// Dependencies threaded through every tool call in this workspace: a
/// handle to the shared context store, the search plugin, and the
/// resolved index configuration.
#[derive(Clone)]
pub struct OrchestratorDeps {
    /// The request's context store.
    pub context: ContextHandle,
    /// The uniform search entry point (spec.md §4.2).
    pub search: Arc<SearchPlugin>,
    /// Resolved per-index search configuration.
    pub search_config: Arc<SearchConfigList>,
}

impl OrchestratorDeps {
    /// Build a fresh dependency bundle around a new context store.
    pub fn new(
        include_eval_content: bool,
        search: Arc<SearchPlugin>,
        search_config: Arc<SearchConfigList>,
    ) -> Self {
        Self {
            context: Arc::new(Mutex::new(ReportabilityContext::new(include_eval_content))),
            search,
            search_config,
        }
    }
}
