#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod catalog;
pub mod extractor;
pub mod fetcher;
pub mod installed;
pub mod query;
pub mod runner;
pub mod schema;
pub mod summary;

pub use catalog::{CatalogPlugin, PluginManifest, RepositoryData};
pub use extractor::{assess_repository, extract_catalog, extract_with_summary, Rejection};
pub use fetcher::{decode_search_result, fetch_search_result, CatalogError};
pub use installed::{
    list_plugins, remove, set_enabled, settings_available, ListingError, PluginHost, StoredPlugin,
};
pub use runner::{ConfigError, ConfigOverrides, IndexRun, Indexer, IndexerConfig, RunnerError};
pub use schema::{RepositoryNode, SearchResult};
pub use summary::ExtractionSummary;
