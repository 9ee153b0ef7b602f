//! Runner error types.

/// Errors that can occur during an indexing run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] super::config::ConfigError),

    /// TLS setup for the HTTP client failed.
    #[error("Failed to set up TLS: {0}")]
    Tls(#[from] rustls::Error),

    /// Search or decode failures.
    #[error(transparent)]
    Catalog(#[from] crate::fetcher::CatalogError),
}
