//! Search plugin layer (C2): a uniform `search(query)` surface over
//! named indexes, backed by an external [`backend::SearchBackend`].

pub mod backend;
pub mod config;
pub mod plugin;

pub use backend::{SearchBackend, SearchHit};
pub use config::{SearchConfigList, SearchIndexConfig, SearchMode};
pub use plugin::SearchPlugin;
