//! # Reportability advisory engine
//!
//! A multi-agent engine that answers "is this plant event reportable
//! under NRC regulations?" by running a fixed roster of LLM agents over
//! two retrieval indexes (NUREG guidance, the plant's reportability
//! manual) and streaming the result back to the client.
//!
//! This crate is a thin umbrella over the workspace's component crates;
//! it has no logic of its own beyond re-exports.
//!
//! - [`core`] — wire types, the per-request context store, the error
//!   taxonomy.
//! - [`search`] — the search plugin layer (C2).
//! - [`tools`] — the tool registry and JSON Schema builder.
//! - [`agent`] — the single-agent kernel (C4).
//! - [`orchestrator`] — the fixed roster and the Single/Sequential/
//!   Concurrent orchestration strategies (C5, C6, C7).
//! - [`streaming`] — the stream framer that turns an orchestrator run
//!   into wire frames (C1).
//!
//! The HTTP surface (`POST /chat/stream`, `GET /health`) lives in the
//! separate `reportability-service` binary crate, not here.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

/// Wire types, the per-request context store, and the error taxonomy.
pub use reportability_core as core;

/// The search plugin layer.
pub use reportability_search as search;

/// The tool registry and JSON Schema builder.
pub use reportability_tools as tools;

/// The single-agent kernel.
pub use reportability_agent as agent;

/// The fixed agent roster and orchestration strategies.
pub use reportability_orchestrator as orchestrator;

/// The stream framer.
pub use reportability_streaming as streaming;

pub use reportability_core::{ChatMessage, ChatRequest, ChatRole, ReportabilityError, Result};
pub use reportability_orchestrator::{OrchestrationType, Roster};
pub use reportability_streaming::DeltaFramer;

/// Convenient prelude for common imports.
///
/// ```ignore
/// use reportability::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{ChatMessage, ChatRequest, ChatRole, ErrorKind, ReportabilityError, Result};
    pub use crate::orchestrator::{AgentDelta, OrchestrationType, OrchestratorDeps, Roster};
    pub use crate::streaming::{error_frame, DeltaFramer};
}

/// Current crate version, as declared in `Cargo.toml`.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_well_formed() {
        assert_eq!(version().split('.').count(), 3);
    }
}
