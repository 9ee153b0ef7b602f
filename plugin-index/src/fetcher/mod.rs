//! Repository search against the GitHub GraphQL API.
//!
//! One POST per call, no retries and no pagination.

mod error;

pub use error::CatalogError;

use crate::query::request_body;
use crate::schema::{GraphQlResponse, SearchResult};
use octocrab::Octocrab;
use tracing::{debug, info, info_span, warn, Instrument};
use url::Url;

/// Runs the search query and decodes the first page of results.
///
/// # Arguments
///
/// * `octocrab` - Authenticated GitHub client
/// * `endpoint` - Absolute URL of the GraphQL endpoint
///
/// # Errors
///
/// Returns [`CatalogError::Transport`] for any non-2xx status, without
/// distinguishing rate limiting, authentication or server failures.
pub async fn fetch_search_result(
    octocrab: &Octocrab,
    endpoint: &Url,
) -> Result<SearchResult, CatalogError> {
    let span = info_span!("fetch", endpoint = %endpoint);

    async {
        info!("Querying repository search");

        let response = octocrab
            ._post(endpoint.as_str(), Some(&request_body()))
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Search request failed");
            return Err(CatalogError::Transport {
                status: status.as_u16(),
            });
        }

        let body = octocrab.body_to_string(response).await?;
        debug!(bytes = body.len(), "Received search response");

        let search = decode_search_result(&body)?;
        info!(
            count = search.nodes.len(),
            has_next_page = search.page_info.has_next_page,
            "Search complete"
        );
        Ok(search)
    }
    .instrument(span)
    .await
}

/// Decodes a GraphQL response body into the search result.
///
/// Errors reported next to usable data are logged and otherwise ignored.
///
/// # Errors
///
/// Returns [`CatalogError::Decode`] on shape mismatch and
/// [`CatalogError::GraphQl`] when no data came back.
pub fn decode_search_result(body: &str) -> Result<SearchResult, CatalogError> {
    let response: GraphQlResponse = serde_json::from_str(body)?;

    match response.data {
        Some(data) => {
            for error in &response.errors {
                warn!(message = %error.message, "GraphQL reported a partial error");
            }
            Ok(data.search)
        }
        None => Err(CatalogError::GraphQl {
            messages: response.errors.into_iter().map(|e| e.message).collect(),
        }),
    }
}
