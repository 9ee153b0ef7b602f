//! Catalog entries returned to callers.

mod manifest;

pub use manifest::PluginManifest;

use serde::Serialize;
use url::Url;

/// A plugin published by a repository, with its resolved script URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogPlugin {
    /// Manifest contents as declared in `plugin.json`.
    #[serde(flatten)]
    pub manifest: PluginManifest,

    /// Absolute URL of the plugin on the repository's deployment.
    pub url: Url,
}

/// A repository that passed every discovery check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryData {
    /// Full repository name in "owner/name" format.
    pub name: String,

    /// Base URL of the active deployment, as reported by GitHub.
    pub url: String,

    /// Plugins in plugins-directory order.
    pub plugins: Vec<CatalogPlugin>,
}
