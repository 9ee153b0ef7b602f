//! Listing and toggling of installed plugins.
//!
//! The plugin store and the plugin runtime live in the host; they are reached
//! through [`PluginHost`]. This module only decides what is listed and which
//! host calls a user action turns into.

mod error;

pub use error::ListingError;

use crate::catalog::PluginManifest;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A plugin as persisted by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPlugin {
    /// Manifest the plugin was installed with.
    pub manifest: PluginManifest,

    /// Whether the plugin is enabled.
    pub on: bool,
}

/// Operations the host exposes for installed plugins.
pub trait PluginHost {
    /// Starts (enables) a plugin.
    fn start_plugin(&mut self, id: &str) -> Result<(), ListingError>;

    /// Stops (disables) a plugin.
    fn stop_plugin(&mut self, id: &str) -> Result<(), ListingError>;

    /// Uninstalls a plugin.
    fn remove_plugin(&mut self, id: &str) -> Result<(), ListingError>;

    /// Whether the plugin registered a settings panel.
    fn has_settings(&self, id: &str) -> bool;
}

/// Lists installed plugins matching `search`, sorted by name.
///
/// An empty search keeps everything. Otherwise a plugin is kept when its
/// name, author or description fuzzy-matches. The plugin with `reserved_id`
/// is never listed.
pub fn list_plugins<'a>(
    installed: &'a HashMap<String, StoredPlugin>,
    search: &str,
    reserved_id: &str,
) -> Vec<(&'a str, &'a StoredPlugin)> {
    let search = search.trim();
    let matcher = SkimMatcherV2::default().ignore_case();

    let mut listed: Vec<_> = installed
        .iter()
        .filter(|(id, _)| id.as_str() != reserved_id)
        .filter(|(_, plugin)| search.is_empty() || matches(&matcher, &plugin.manifest, search))
        .map(|(id, plugin)| (id.as_str(), plugin))
        .collect();

    // Ties fall back to the id so the order does not depend on hashing.
    listed.sort_by(|(id_a, a), (id_b, b)| {
        a.manifest
            .name
            .to_lowercase()
            .cmp(&b.manifest.name.to_lowercase())
            .then_with(|| id_a.cmp(id_b))
    });
    listed
}

fn matches(matcher: &SkimMatcherV2, manifest: &PluginManifest, search: &str) -> bool {
    [&manifest.name, &manifest.author, &manifest.description]
        .into_iter()
        .any(|field| matcher.fuzzy_match(field, search).is_some())
}

/// Switches a plugin on or off.
///
/// Returns `false` without calling the host when the plugin is already in
/// the requested state.
///
/// # Errors
///
/// Propagates host failures.
pub fn set_enabled(
    host: &mut impl PluginHost,
    id: &str,
    plugin: &StoredPlugin,
    on: bool,
) -> Result<bool, ListingError> {
    if plugin.on == on {
        return Ok(false);
    }

    debug!(id, on, "Toggling plugin");
    if on {
        host.start_plugin(id)?;
    } else {
        host.stop_plugin(id)?;
    }
    Ok(true)
}

/// Uninstalls a plugin.
///
/// # Errors
///
/// Returns [`ListingError::ReservedPlugin`] for the reserved id, or the
/// host's failure.
pub fn remove(host: &mut impl PluginHost, id: &str, reserved_id: &str) -> Result<(), ListingError> {
    if id == reserved_id {
        return Err(ListingError::ReservedPlugin { id: id.to_string() });
    }

    debug!(id, "Removing plugin");
    host.remove_plugin(id)
}

/// Whether a settings panel should be offered for the plugin.
///
/// Settings are only reachable while the plugin is enabled.
pub fn settings_available(host: &impl PluginHost, id: &str, plugin: &StoredPlugin) -> bool {
    plugin.on && host.has_settings(id)
}
