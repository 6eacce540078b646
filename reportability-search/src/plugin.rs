//! The search plugin (C2): `search(query)` over a named index, with
//! score thresholding and de-duplication against a request's plugin
//! result registry.

use std::sync::Arc;

use reportability_core::document::PluginResult;
use reportability_core::error::{ReportabilityError, Result};

use crate::backend::SearchBackend;
use crate::config::{SearchIndexConfig, SearchMode};

/// Raw hit fields expected from the backend, deserialized directly into
/// a [`PluginResult`]'s constituent parts. The backend is expected to
/// project its stored documents into this shape via `select_fields`.
#[derive(Debug, Clone, serde::Deserialize)]
struct RawHitFields {
    #[serde(flatten)]
    payload: reportability_core::document::PluginResultPayload,
    storage_account: String,
    container: String,
    blob_name: String,
    #[serde(default)]
    page_number: Option<u32>,
}

/// Uniform search entry point used by every agent's search tool.
pub struct SearchPlugin {
    backend: Arc<dyn SearchBackend>,
}

impl SearchPlugin {
    /// Build a plugin over a concrete backend.
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    /// Query `config`'s index for `query_text` and return de-duplicated
    /// [`PluginResult`]s not already present in `already_seen`.
    ///
    /// Steps (spec.md §4.2):
    /// 1. Query the backend.
    /// 2. Drop hits below `config.threshold`.
    /// 3. Convert each surviving hit into a `PluginResult`.
    /// 4. Drop hits whose id is already in `already_seen` (they were
    ///    already surfaced by an earlier search this request).
    /// 5. Tag each surviving result with `config.search_type` and the
    ///    query text that produced it.
    /// 6. Return the list; callers register each into the shared
    ///    registry themselves (the plugin has no mutable access to it).
    pub async fn search(
        &self,
        index_logical_name: &str,
        config: &SearchIndexConfig,
        query_text: &str,
        already_seen: impl Fn(&str) -> bool,
    ) -> Result<Vec<PluginResult>> {
        let hits = self
            .backend
            .query(config, query_text)
            .await
            .map_err(|source| ReportabilityError::SearchTransient {
                index: index_logical_name.to_string(),
                source,
            })?;

        let mut results = Vec::new();
        for hit in hits {
            if hit.score < config.threshold {
                continue;
            }
            if already_seen(&hit.id) {
                continue;
            }
            let raw: RawHitFields = match serde_json::from_value(hit.fields) {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::warn!(
                        index = index_logical_name,
                        hit_id = %hit.id,
                        error = %err,
                        "dropping search hit with unparseable fields"
                    );
                    continue;
                }
            };
            results.push(PluginResult {
                id: hit.id,
                search_type: search_mode_label(config.search_type).to_string(),
                search_query: query_text.to_string(),
                location: reportability_core::document::BlobLocation {
                    storage_account: raw.storage_account,
                    container: raw.container,
                    blob_name: raw.blob_name,
                    page_number: raw.page_number,
                },
                cited: false,
                payload: raw.payload,
            });
        }
        Ok(results)
    }
}

fn search_mode_label(mode: SearchMode) -> &'static str {
    match mode {
        SearchMode::FullText => "full_text",
        SearchMode::Vector => "vector",
        SearchMode::Hybrid => "hybrid",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fixtures::{sample_config, FailingBackend, StubBackend};
    use crate::backend::SearchHit;
    use std::collections::HashSet;
    use std::sync::atomic::AtomicUsize;

    fn hit(id: &str, score: f64) -> SearchHit {
        SearchHit {
            id: id.to_string(),
            score,
            fields: serde_json::json!({
                "kind": "naive_chunk",
                "title": "Title",
                "url": "https://example.com/doc",
                "content": "chunk text",
                "storage_account": "acct",
                "container": "c",
                "blob_name": "b.pdf",
                "page_number": null,
            }),
        }
    }

    #[tokio::test]
    async fn drops_hits_below_threshold() {
        let backend = Arc::new(StubBackend {
            hits: vec![hit("a", 0.9), hit("b", 0.1)],
            calls: AtomicUsize::new(0),
        });
        let plugin = SearchPlugin::new(backend);
        let config = sample_config(crate::config::SearchMode::Hybrid);
        let results = plugin
            .search("nureg", &config, "feedwater isolation", |_| false)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "a");
    }

    #[tokio::test]
    async fn drops_hits_already_seen() {
        let backend = Arc::new(StubBackend {
            hits: vec![hit("a", 0.9), hit("b", 0.9)],
            calls: AtomicUsize::new(0),
        });
        let plugin = SearchPlugin::new(backend);
        let config = sample_config(crate::config::SearchMode::Hybrid);
        let mut seen = HashSet::new();
        seen.insert("a".to_string());
        let results = plugin
            .search("nureg", &config, "q", |id| seen.contains(id))
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "b");
    }

    #[tokio::test]
    async fn propagates_backend_failure_as_search_transient() {
        let backend = Arc::new(FailingBackend);
        let plugin = SearchPlugin::new(backend);
        let config = sample_config(crate::config::SearchMode::Hybrid);
        let err = plugin.search("nureg", &config, "q", |_| false).await;
        assert!(matches!(
            err,
            Err(ReportabilityError::SearchTransient { .. })
        ));
    }

    #[tokio::test]
    async fn tags_results_with_search_type_and_query() {
        let backend = Arc::new(StubBackend {
            hits: vec![hit("a", 0.9)],
            calls: AtomicUsize::new(0),
        });
        let plugin = SearchPlugin::new(backend);
        let config = sample_config(crate::config::SearchMode::Vector);
        let results = plugin
            .search("nureg", &config, "loss of coolant", |_| false)
            .await
            .unwrap();
        assert_eq!(results[0].search_type, "vector");
        assert_eq!(results[0].search_query, "loss of coolant");
    }
}
