//! The producer/consumer value type flowing from orchestrators to the
//! stream framer: `(content, role, flags)` (spec.md §9's "Streaming +
//! per-delta metadata is a cross-cutting concern" redesign note).

use reportability_core::messages::{ChatRole, DeltaFlags};

/// One unit of orchestrator output: a content fragment, the role it
/// should be attributed to, and the metadata flags governing how the
/// stream framer and context store treat it.
#[derive(Debug, Clone)]
pub struct AgentDelta {
    /// Text content. Never meaningful to buffer when empty; callers
    /// should skip emitting deltas with empty content unless they carry
    /// a `flush` flag (spec.md §4.1).
    pub content: String,
    /// Role to attribute this fragment to on the wire.
    pub role: ChatRole,
    /// Delivery/history metadata.
    pub flags: DeltaFlags,
}

impl AgentDelta {
    /// A normal user-visible, history-appended assistant fragment.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: ChatRole::Assistant,
            flags: DeltaFlags::default(),
        }
    }

    /// A user-visible fragment excluded from history — the "Reviewed"
    /// and "Citing" lines spec.md §4.5 describes, and orchestrator
    /// section headers.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: ChatRole::Assistant,
            flags: DeltaFlags {
                add_to_chat_history: false,
                ..DeltaFlags::default()
            },
        }
    }

    /// A fragment recorded into history but never shown to the user —
    /// a cited result's full agent string (spec.md §4.5).
    pub fn history_only(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: ChatRole::Assistant,
            flags: DeltaFlags {
                yield_to_user: false,
                ..DeltaFlags::default()
            },
        }
    }

    /// Force a flush of whatever is already buffered, independent of
    /// this fragment's own content (spec.md §4.1's flushing header).
    #[must_use]
    pub fn flushing(mut self) -> Self {
        self.flags.flush = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ephemeral_deltas_are_excluded_from_history() {
        let delta = AgentDelta::ephemeral("Reviewed [x](y)");
        assert!(!delta.flags.add_to_chat_history);
        assert!(delta.flags.yield_to_user);
    }

    #[test]
    fn history_only_deltas_are_hidden_from_the_user() {
        let delta = AgentDelta::history_only("dense agent string");
        assert!(!delta.flags.yield_to_user);
        assert!(delta.flags.add_to_chat_history);
    }
}
