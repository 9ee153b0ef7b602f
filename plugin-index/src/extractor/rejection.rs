//! Reasons a repository is left out of the catalog.

use thiserror::Error;

/// Why a repository did not make it into the catalog.
///
/// Rejections are not errors for the caller; absence from the catalog is the
/// only signal. They are logged and counted in the run summary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// No `.github/workflows` directory.
    #[error("no workflows directory")]
    NoWorkflows,

    /// No workflow file mentions the runtime.
    #[error("no workflow references the runtime")]
    RuntimeNotReferenced,

    /// No deployment is currently active.
    #[error("no active deployment")]
    NoActiveDeployment,

    /// The active deployment has no environment URL.
    #[error("active deployment has no environment URL")]
    NoEnvironmentUrl,

    /// The environment URL cannot be used as a base URL.
    #[error("environment URL '{url}' is not a valid base URL")]
    InvalidEnvironmentUrl { url: String },

    /// No `plugins` directory.
    #[error("no plugins directory")]
    NoPluginsDirectory,

    /// A plugin folder has no `plugin.json`; the whole repository is skipped.
    #[error("plugin folder '{folder}' has no plugin.json")]
    MissingManifest { folder: String },

    /// No plugin folder yielded a usable manifest.
    #[error("no valid plugins")]
    NoValidPlugins,
}

impl Rejection {
    /// Stable key used when tallying rejections.
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::NoWorkflows => "no-workflows",
            Rejection::RuntimeNotReferenced => "runtime-not-referenced",
            Rejection::NoActiveDeployment => "no-active-deployment",
            Rejection::NoEnvironmentUrl => "no-environment-url",
            Rejection::InvalidEnvironmentUrl { .. } => "invalid-environment-url",
            Rejection::NoPluginsDirectory => "no-plugins-directory",
            Rejection::MissingManifest { .. } => "missing-manifest",
            Rejection::NoValidPlugins => "no-valid-plugins",
        }
    }
}
