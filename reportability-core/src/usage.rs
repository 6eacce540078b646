//! Per-agent token usage accounting.
//!
//! Redesigned from the original implementation's flat append-only usage
//! list into a small associative accumulator keyed by agent name (spec.md
//! §9 Design Notes): callers care "how many tokens did the Recommendation
//! agent use across its turns", not a chronological log of every request.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Token usage for one agent's turn(s) within a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt sent to the backend.
    pub prompt_tokens: u64,
    /// Tokens in the backend's completion.
    pub completion_tokens: u64,
}

impl TokenUsage {
    /// Total tokens, prompt plus completion.
    pub fn total(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

impl std::ops::AddAssign for TokenUsage {
    fn add_assign(&mut self, rhs: Self) {
        self.prompt_tokens += rhs.prompt_tokens;
        self.completion_tokens += rhs.completion_tokens;
    }
}

/// Accumulates [`TokenUsage`] per agent name across a single request's
/// lifetime. Insertion order is preserved so a final summary can list
/// agents in the order they first ran.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsageAccumulator {
    by_agent: IndexMap<String, TokenUsage>,
}

impl TokenUsageAccumulator {
    /// An empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add usage for one agent turn, summing into any existing entry for
    /// that agent name. Never double-counts: each call represents exactly
    /// one backend response.
    pub fn record(&mut self, agent_name: &str, usage: TokenUsage) {
        self.by_agent
            .entry(agent_name.to_string())
            .or_default()
            .add_assign(usage);
    }

    /// Usage recorded so far for a given agent, if any.
    pub fn for_agent(&self, agent_name: &str) -> Option<TokenUsage> {
        self.by_agent.get(agent_name).copied()
    }

    /// Total tokens across every agent.
    pub fn total(&self) -> u64 {
        self.by_agent.values().map(TokenUsage::total).sum()
    }

    /// Iterate agents in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenUsage)> {
        self.by_agent.iter().map(|(k, v)| (k.as_str(), v))
    }
}
