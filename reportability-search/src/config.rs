//! Search index configuration, loaded once at startup from the
//! search-configuration file named in SPEC_FULL.md §6.

use serde::{Deserialize, Serialize};

/// Which retrieval mode an index is queried with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Lexical/keyword search.
    FullText,
    /// Dense embedding similarity search.
    Vector,
    /// Combination of full-text and vector scoring.
    Hybrid,
}

/// Static configuration for one named search index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchIndexConfig {
    /// Name of the environment variable holding the actual index name
    /// (indirection so the same config file works across environments).
    pub index_name_setting: String,
    /// Resolved index name, filled in once at startup by reading
    /// `index_name_setting` from the environment.
    #[serde(default)]
    pub index_name: String,
    /// Retrieval mode this index is queried with.
    pub search_type: SearchMode,
    /// Number of nearest neighbors to request for vector/hybrid queries.
    pub k_nearest_neighbors: u32,
    /// Maximum number of hits to return.
    pub top: u32,
    /// Fields to match against for full-text scoring.
    pub search_fields: Vec<String>,
    /// Fields to return in each hit.
    pub select_fields: Vec<String>,
    /// Fields holding the embedding vectors, for vector/hybrid queries.
    #[serde(default)]
    pub vector_fields: Vec<String>,
    /// Minimum relevance score a hit must meet to be kept.
    pub threshold: f64,
}

/// The full list of configured indexes, keyed by logical name (the name
/// an agent's search tool targets).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfigList {
    /// Logical index name -> configuration.
    pub indexes: indexmap::IndexMap<String, SearchIndexConfig>,
}

impl SearchConfigList {
    /// Resolve each entry's `index_name` from the environment variable
    /// named by `index_name_setting`. Returns a [`reportability_core::error::ReportabilityError::ConfigMissing`]
    /// for the first entry whose environment variable is unset.
    pub fn resolve_from_env(&mut self) -> reportability_core::error::Result<()> {
        for (logical_name, config) in self.indexes.iter_mut() {
            let resolved = std::env::var(&config.index_name_setting).map_err(|_| {
                reportability_core::error::ReportabilityError::ConfigMissing(format!(
                    "search index '{logical_name}': environment variable '{}' is not set",
                    config.index_name_setting
                ))
            })?;
            config.index_name = resolved;
        }
        Ok(())
    }

    /// Look up configuration for a logical index name.
    pub fn get(&self, logical_name: &str) -> Option<&SearchIndexConfig> {
        self.indexes.get(logical_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_from_env_fills_in_index_name() {
        std::env::set_var("TEST_NUREG_INDEX", "nureg-prod-v3");
        let mut list = SearchConfigList::default();
        list.indexes.insert(
            "nureg".to_string(),
            SearchIndexConfig {
                index_name_setting: "TEST_NUREG_INDEX".to_string(),
                index_name: String::new(),
                search_type: SearchMode::Hybrid,
                k_nearest_neighbors: 20,
                top: 5,
                search_fields: vec!["content".to_string()],
                select_fields: vec!["id".to_string()],
                vector_fields: vec!["embedding".to_string()],
                threshold: 0.7,
            },
        );
        list.resolve_from_env().unwrap();
        assert_eq!(list.get("nureg").unwrap().index_name, "nureg-prod-v3");
    }

    #[test]
    fn resolve_from_env_errors_on_missing_variable() {
        let mut list = SearchConfigList::default();
        list.indexes.insert(
            "missing".to_string(),
            SearchIndexConfig {
                index_name_setting: "DEFINITELY_NOT_SET_XYZ".to_string(),
                index_name: String::new(),
                search_type: SearchMode::FullText,
                k_nearest_neighbors: 0,
                top: 5,
                search_fields: vec![],
                select_fields: vec![],
                vector_fields: vec![],
                threshold: 0.0,
            },
        );
        assert!(list.resolve_from_env().is_err());
    }
}
