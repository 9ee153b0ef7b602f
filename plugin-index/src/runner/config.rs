//! Indexer configuration.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Default GitHub REST/GraphQL API root.
pub const DEFAULT_API_BASE_URI: &str = "https://api.github.com/";

/// User agent identifying the scraper.
pub const DEFAULT_USER_AGENT: &str = "shelter/plugin-scraper";

/// Errors that can occur while building the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse config in '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A setting has an unusable value.
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Optional overrides read from a TOML file.
///
/// ```toml
/// api-base-uri = "https://github.example.com/api/"
/// user-agent = "my-index/1.0"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigOverrides {
    /// API root the GraphQL endpoint is resolved against.
    pub api_base_uri: Option<String>,

    /// User agent sent with the search request.
    pub user_agent: Option<String>,
}

/// Configuration for an indexing run.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// GitHub token sent as a bearer credential.
    token: String,
    /// API root, always ending in `/`.
    api_base_uri: String,
    /// User agent sent with the request.
    user_agent: String,
}

impl IndexerConfig {
    /// Creates a configuration targeting github.com.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base_uri: DEFAULT_API_BASE_URI.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Sets a custom API root (e.g. a GitHub Enterprise host).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] unless the URI is an absolute
    /// http(s) URL.
    pub fn with_api_base_uri(mut self, uri: &str) -> Result<Self, ConfigError> {
        self.api_base_uri = parse_base_uri(uri)?.into();
        Ok(self)
    }

    /// Sets a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Applies overrides from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or holds
    /// invalid values.
    pub fn with_overrides_file(self, path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading config overrides");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        let overrides: ConfigOverrides =
            toml::from_str(&content).map_err(|e| ConfigError::TomlError {
                path: path.display().to_string(),
                source: e,
            })?;

        self.with_overrides(overrides)
    }

    /// Applies already parsed overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an invalid API root.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(uri) = overrides.api_base_uri {
            self = self.with_api_base_uri(&uri)?;
        }
        if let Some(user_agent) = overrides.user_agent {
            self = self.with_user_agent(user_agent);
        }
        Ok(self)
    }

    /// Checks that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty token or user agent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "token",
                message: "must not be empty".to_string(),
            });
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "user-agent",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the API root.
    pub fn api_base_uri(&self) -> &str {
        &self.api_base_uri
    }

    /// Returns the user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the GraphQL endpoint under the API root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the endpoint cannot be joined.
    pub fn graphql_endpoint(&self) -> Result<Url, ConfigError> {
        parse_base_uri(&self.api_base_uri)?
            .join("graphql")
            .map_err(|e| ConfigError::InvalidValue {
                key: "api-base-uri",
                message: e.to_string(),
            })
    }
}

fn parse_base_uri(uri: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(uri).map_err(|e| ConfigError::InvalidValue {
        key: "api-base-uri",
        message: format!("{uri}: {e}"),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            key: "api-base-uri",
            message: format!("{uri}: scheme must be http or https"),
        });
    }

    // Joining "graphql" must append, not replace the last segment.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
