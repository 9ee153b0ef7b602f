//! The fixed GraphQL search document used for plugin discovery.
//!
//! Nothing here is parameterized: the keyword, result count and nested
//! directory expressions are compile-time constants.

use serde_json::{json, Value};

/// Topic/keyword repositories publish under to be discovered.
pub const SEARCH_KEYWORD: &str = "shelter-plugins";

/// Substring looked for in workflow files as a weak signal that the
/// repository builds its plugins with the framework's tooling.
pub const RUNTIME_NAME: &str = "lune";

/// Maximum repositories requested. Only the first page is ever read.
pub const MAX_REPOSITORIES: u32 = 100;

/// Maximum deployments requested per repository.
pub const MAX_DEPLOYMENTS: u32 = 10;

/// Git object expression for the workflow directory.
pub const WORKFLOWS_EXPRESSION: &str = "HEAD:.github/workflows";

/// Git object expression for the plugins directory.
pub const PLUGINS_EXPRESSION: &str = "HEAD:plugins";

/// Name of the manifest file inside each plugin folder.
pub const MANIFEST_FILE: &str = "plugin.json";

/// The search document sent to the GraphQL endpoint.
pub const SEARCH_QUERY: &str = r#"query {
  search(query: "shelter-plugins", type: REPOSITORY, first: 100) {
    nodes {
      ... on Repository {
        nameWithOwner
        deployments(first: 10, orderBy: {field: CREATED_AT, direction: DESC}) {
          nodes {
            state
            latestStatus {
              state
              environmentUrl
            }
          }
        }
        workflows: object(expression: "HEAD:.github/workflows") {
          ... on Tree {
            entries {
              name
              type
              object {
                ... on Blob {
                  text
                }
              }
            }
          }
        }
        plugins: object(expression: "HEAD:plugins") {
          ... on Tree {
            entries {
              name
              type
              object {
                ... on Tree {
                  entries {
                    name
                    type
                    object {
                      ... on Blob {
                        text
                      }
                    }
                  }
                }
              }
            }
          }
        }
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}"#;

/// Builds the JSON request body. The document carries no variables.
pub fn request_body() -> Value {
    json!({ "query": SEARCH_QUERY })
}
