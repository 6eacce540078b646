//! The external retrieval backend collaborator interface.
//!
//! A concrete `SearchBackend` implementation (an Azure AI Search client,
//! a pgvector-backed store, whatever the deployment uses) lives outside
//! this workspace's scope — spec.md §1 lists the search backend among
//! the external collaborators. This module only defines the trait the
//! rest of the crate programs against.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::SearchIndexConfig;

/// One raw hit returned by a backend query, before it is turned into a
/// domain `PluginResult`.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Backend-assigned document id.
    pub id: String,
    /// Relevance score assigned by the backend.
    pub score: f64,
    /// The selected fields for this hit, as raw JSON.
    pub fields: Value,
}

/// A queryable retrieval backend. Implementations are process-wide and
/// must be safe for concurrent use, matching the chat-completion
/// backend's collaborator contract in SPEC_FULL.md §4.4.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one query against one configured index and return its raw
    /// hits, already limited to `config.top`.
    async fn query(&self, config: &SearchIndexConfig, query_text: &str) -> anyhow::Result<Vec<SearchHit>>;
}
