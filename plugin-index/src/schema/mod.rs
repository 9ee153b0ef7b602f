//! Typed shape of the GraphQL search response.
//!
//! Every field the search document requests has a counterpart here, so a
//! response that does not match the query shape fails to decode instead of
//! surfacing later as a missing value.

mod deployment;
mod tree;

pub use deployment::{Deployment, DeploymentState, DeploymentStatus, DeploymentStatusState, Deployments};
pub use tree::{BlobObject, EntryKind, FolderObject, Tree, TreeEntry};

use serde::Deserialize;

/// Top-level GraphQL envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse {
    /// Query result. Absent when the server rejected the query.
    #[serde(default)]
    pub data: Option<SearchData>,

    /// Errors reported alongside (or instead of) the data.
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// A single GraphQL error entry.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    /// Human readable message.
    pub message: String,
}

/// The `data` member of the response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchData {
    pub search: SearchResult,
}

/// One page of repository search results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Repositories in server order.
    pub nodes: Vec<RepositoryNode>,

    /// Pagination cursor. Received but never followed.
    pub page_info: PageInfo,
}

/// Pagination state reported by the search connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// A repository returned by the search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    /// Full repository name in "owner/name" format.
    pub name_with_owner: String,

    /// Most recent deployments, newest first.
    pub deployments: Deployments,

    /// Listing of `.github/workflows`, if the directory exists.
    pub workflows: Option<Tree<BlobObject>>,

    /// Listing of `plugins`, if the directory exists.
    pub plugins: Option<Tree<FolderObject>>,
}
