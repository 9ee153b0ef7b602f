//! `plugin.json` manifest.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parsed contents of a plugin's `plugin.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Display name.
    pub name: String,

    /// Author name.
    pub author: String,

    /// Short description.
    pub description: String,

    /// Content hash of the built plugin, when published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Any other fields the manifest declares, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PluginManifest {
    /// Creates a manifest with only the required fields.
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            description: description.into(),
            hash: None,
            extra: Map::new(),
        }
    }

    /// Parses manifest text.
    ///
    /// A declared `url` field is dropped; catalog entries carry a resolved one.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the text is not an object with the
    /// required string fields.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let mut manifest: PluginManifest = serde_json::from_str(text)?;
        manifest.extra.remove("url");
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_required_fields() {
        let manifest =
            PluginManifest::parse(r#"{"name":"Foo","author":"bar","description":"baz"}"#).unwrap();
        assert_eq!(manifest, PluginManifest::new("Foo", "bar", "baz"));
    }

    #[test]
    fn keeps_hash_and_extra_fields() {
        let manifest = PluginManifest::parse(
            r#"{"name":"Foo","author":"bar","description":"baz","hash":"abc","version":2,"url":"x"}"#,
        )
        .unwrap();

        assert_eq!(manifest.hash.as_deref(), Some("abc"));
        assert_eq!(manifest.extra.get("version"), Some(&Value::from(2)));
        assert!(!manifest.extra.contains_key("url"));
    }

    #[test]
    fn rejects_missing_fields_and_bad_json() {
        assert!(PluginManifest::parse(r#"{"name":"Foo"}"#).is_err());
        assert!(PluginManifest::parse("{not json").is_err());
        assert!(PluginManifest::parse("[]").is_err());
    }
}
