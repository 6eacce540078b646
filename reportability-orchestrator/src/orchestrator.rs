//! Strategy selection and the public entry point into this crate (C7's
//! dispatch half, spec.md §4.7 / SPEC_FULL.md §4.7).

use std::str::FromStr;
use std::sync::Arc;

use crate::concurrent::run_concurrent;
use crate::deps::OrchestratorDeps;
use crate::roster::Roster;
use crate::sequential::run_sequential;
use crate::single::run_single;
use crate::stream::OrchestratorStream;

/// Which orchestration strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestrationType {
    /// One agent does search and recommendation in one turn.
    Single,
    /// Intent, then knowledge agents, then Recommendation, strictly serial.
    Sequential,
    /// Intent, then both knowledge agents concurrently, then Recommendation.
    Concurrent,
}

impl FromStr for OrchestrationType {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "single" => Ok(Self::Single),
            "sequential" => Ok(Self::Sequential),
            "concurrent" => Ok(Self::Concurrent),
            _ => Err(()),
        }
    }
}

/// Resolve the orchestration type for one request, per SPEC_FULL.md
/// §4.7's three-step fallback chain:
/// 1. A valid `query_param` wins outright.
/// 2. An absent `query_param` falls back to `configured_default`.
/// 3. A present but invalid `query_param` is logged and falls back to
///    [`OrchestrationType::Single`], ignoring `configured_default` —
///    an explicit bad value is a caller mistake, not a configuration
///    signal.
pub fn resolve_orchestration_type(query_param: Option<&str>, configured_default: OrchestrationType) -> OrchestrationType {
    match query_param {
        None => configured_default,
        Some(value) => match value.parse() {
            Ok(kind) => kind,
            Err(()) => {
                tracing::warn!(value, "unknown orchestrationType query parameter; defaulting to single");
                OrchestrationType::Single
            }
        },
    }
}

/// Run the selected strategy against a fresh request, returning the
/// stream the request handler forwards to the framer (C1).
pub fn run(kind: OrchestrationType, roster: Arc<Roster>, deps: OrchestratorDeps, user_content: String) -> OrchestratorStream {
    let (tx, stream) = OrchestratorStream::channel();

    tokio::spawn(async move {
        match kind {
            OrchestrationType::Single => run_single(&roster, deps, user_content, tx).await,
            OrchestrationType::Sequential => run_sequential(&roster, deps, user_content, tx).await,
            OrchestrationType::Concurrent => run_concurrent(&roster, deps, user_content, tx).await,
        }
    });

    stream
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_query_param_uses_configured_default() {
        assert_eq!(
            resolve_orchestration_type(None, OrchestrationType::Concurrent),
            OrchestrationType::Concurrent
        );
    }

    #[test]
    fn valid_query_param_wins_over_configured_default() {
        assert_eq!(
            resolve_orchestration_type(Some("sequential"), OrchestrationType::Concurrent),
            OrchestrationType::Sequential
        );
    }

    #[test]
    fn invalid_query_param_falls_back_to_single_regardless_of_default() {
        assert_eq!(
            resolve_orchestration_type(Some("garbage"), OrchestrationType::Concurrent),
            OrchestrationType::Single
        );
    }
}
