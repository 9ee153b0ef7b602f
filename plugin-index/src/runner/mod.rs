//! Orchestrates a catalog scrape: fetch, then extract.

mod config;
mod error;

pub use config::{
    ConfigError, ConfigOverrides, IndexerConfig, DEFAULT_API_BASE_URI, DEFAULT_USER_AGENT,
};
pub use error::RunnerError;

use crate::catalog::RepositoryData;
use crate::extractor::extract_with_summary;
use crate::fetcher::fetch_search_result;
use crate::summary::ExtractionSummary;
use http::header::{AUTHORIZATION, USER_AGENT};
use http::{HeaderName, HeaderValue, Uri};
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use octocrab::service::middleware::base_uri::BaseUriLayer;
use octocrab::service::middleware::extra_headers::ExtraHeadersLayer;
use octocrab::{AuthState, Octocrab, OctocrabBuilder};
use std::sync::Arc;
use tracing::info;

/// Result of a single run.
#[derive(Debug, Clone)]
pub struct IndexRun {
    /// Repositories that passed every check, in search order.
    pub catalog: Vec<RepositoryData>,

    /// What was scanned and why repositories were dropped.
    pub summary: ExtractionSummary,
}

/// Runs catalog scrapes with an authenticated GitHub client.
pub struct Indexer {
    config: IndexerConfig,
    octocrab: Octocrab,
}

impl Indexer {
    /// Builds an indexer from the provided configuration.
    ///
    /// The client sends the token as a bearer credential, a single
    /// user agent, and never retries.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] for invalid configuration or when the client
    /// cannot be built.
    pub fn new(config: IndexerConfig) -> Result<Self, RunnerError> {
        config.validate()?;
        let octocrab = build_client(&config)?;
        Ok(Self { config, octocrab })
    }

    /// Returns the configuration the indexer was built with.
    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Fetches the search page and extracts the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Catalog`] if the search fails. No partial
    /// catalog is returned.
    pub async fn run(&self) -> Result<IndexRun, RunnerError> {
        let endpoint = self.config.graphql_endpoint()?;
        let search = fetch_search_result(&self.octocrab, &endpoint).await?;

        let (catalog, summary) = extract_with_summary(&search);
        info!(
            scanned = summary.repositories_scanned,
            accepted = summary.repositories_accepted,
            plugins = summary.plugins_found,
            "Catalog extracted"
        );

        Ok(IndexRun { catalog, summary })
    }
}

/// Builds an octocrab client on a bare hyper stack.
///
/// The default builder always adds its own `User-Agent`, so the headers are
/// set here instead: exactly one user agent plus the bearer token. The stack
/// has no retry layer.
fn build_client(config: &IndexerConfig) -> Result<Octocrab, RunnerError> {
    let base_uri: Uri = config
        .api_base_uri()
        .parse()
        .map_err(|e: http::uri::InvalidUri| ConfigError::InvalidValue {
            key: "api-base-uri",
            message: e.to_string(),
        })?;
    let headers = request_headers(config)?;

    let connector = HttpsConnectorBuilder::new()
        .with_provider_and_webpki_roots(rustls::crypto::aws_lc_rs::default_provider())?
        .https_or_http()
        .enable_http1()
        .build();
    let client = Client::builder(TokioExecutor::new()).build(connector);

    let built = OctocrabBuilder::new_empty()
        .with_service(client)
        .with_layer(&BaseUriLayer::new(base_uri))
        .with_layer(&ExtraHeadersLayer::new(Arc::new(headers)))
        .with_auth(AuthState::None)
        .build();

    match built {
        Ok(octocrab) => Ok(octocrab),
        Err(never) => match never {},
    }
}

/// Headers sent with every request.
fn request_headers(
    config: &IndexerConfig,
) -> Result<Vec<(HeaderName, HeaderValue)>, ConfigError> {
    let user_agent =
        HeaderValue::from_str(config.user_agent()).map_err(|e| ConfigError::InvalidValue {
            key: "user-agent",
            message: e.to_string(),
        })?;

    let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.token()))
        .map_err(|e| ConfigError::InvalidValue {
            key: "token",
            message: e.to_string(),
        })?;
    authorization.set_sensitive(true);

    Ok(vec![(USER_AGENT, user_agent), (AUTHORIZATION, authorization)])
}
