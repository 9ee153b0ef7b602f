//! Catalog fetch error types.

use thiserror::Error;

/// Errors that can occur while fetching the search result.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The search endpoint answered with a non-success status.
    #[error("non-ok response status {status}")]
    Transport { status: u16 },

    /// GitHub client error (connection, body read, request build).
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The response body does not match the query shape.
    #[error("Failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server returned GraphQL errors and no data.
    #[error("GraphQL query failed: {}", messages.join("; "))]
    GraphQl { messages: Vec<String> },
}
