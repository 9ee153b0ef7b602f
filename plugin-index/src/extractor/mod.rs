//! Catalog extraction from a search result.
//!
//! Each repository runs through an ordered sequence of checks. The first
//! failing check drops the repository:
//! 1. a workflow file mentions [`RUNTIME_NAME`]
//! 2. the first active deployment has a usable environment URL
//! 3. every plugin folder has a `plugin.json`
//! 4. at least one manifest parses
//! 5. plugin URLs resolve against the deployment URL

mod rejection;

pub use rejection::Rejection;

use crate::catalog::{CatalogPlugin, PluginManifest, RepositoryData};
use crate::query::{MANIFEST_FILE, RUNTIME_NAME};
use crate::schema::{BlobObject, Deployments, FolderObject, RepositoryNode, SearchResult, Tree};
use crate::summary::ExtractionSummary;
use tracing::{debug, warn};
use url::Url;

/// Extracts the catalog, keeping input order and dropping rejected repositories.
pub fn extract_catalog(result: &SearchResult) -> Vec<RepositoryData> {
    extract_with_summary(result).0
}

/// Extracts the catalog and tallies what was dropped and why.
pub fn extract_with_summary(result: &SearchResult) -> (Vec<RepositoryData>, ExtractionSummary) {
    let mut summary = ExtractionSummary::new(result.page_info.has_next_page);
    let mut catalog = Vec::new();

    if result.page_info.has_next_page {
        warn!(
            cursor = result.page_info.end_cursor.as_deref().unwrap_or_default(),
            "More search results available, only the first page is read"
        );
    }

    for repository in &result.nodes {
        match assess_repository(repository) {
            Ok(data) => {
                debug!(
                    repo = %data.name,
                    plugins = data.plugins.len(),
                    "Repository accepted"
                );
                summary.record_accepted(&data);
                catalog.push(data);
            }
            Err(rejection) => {
                debug!(
                    repo = %repository.name_with_owner,
                    reason = %rejection,
                    "Repository rejected"
                );
                summary.record_rejected(&rejection);
            }
        }
    }

    (catalog, summary)
}

/// Runs every check against a single repository.
///
/// # Errors
///
/// Returns the [`Rejection`] of the first check that fails.
pub fn assess_repository(repository: &RepositoryNode) -> Result<RepositoryData, Rejection> {
    let workflows = repository
        .workflows
        .as_ref()
        .ok_or(Rejection::NoWorkflows)?;
    if !references_runtime(workflows) {
        return Err(Rejection::RuntimeNotReferenced);
    }

    let environment_url = environment_url(&repository.deployments)?;
    let base = Url::parse(environment_url).map_err(|_| Rejection::InvalidEnvironmentUrl {
        url: environment_url.to_string(),
    })?;

    let plugins_dir = repository
        .plugins
        .as_ref()
        .ok_or(Rejection::NoPluginsDirectory)?;
    let manifests = collect_manifests(&repository.name_with_owner, plugins_dir)?;
    if manifests.is_empty() {
        return Err(Rejection::NoValidPlugins);
    }

    let plugins = manifests
        .into_iter()
        .map(|(folder, manifest)| {
            let url = base
                .join(folder)
                .map_err(|_| Rejection::InvalidEnvironmentUrl {
                    url: environment_url.to_string(),
                })?;
            Ok(CatalogPlugin { manifest, url })
        })
        .collect::<Result<Vec<_>, Rejection>>()?;

    Ok(RepositoryData {
        name: repository.name_with_owner.clone(),
        url: environment_url.to_string(),
        plugins,
    })
}

/// Whether any workflow file mentions the runtime.
fn references_runtime(workflows: &Tree<BlobObject>) -> bool {
    workflows
        .entries
        .iter()
        .filter_map(|entry| entry.text())
        .any(|text| text.contains(RUNTIME_NAME))
}

/// Environment URL of the first active deployment.
fn environment_url(deployments: &Deployments) -> Result<&str, Rejection> {
    deployments
        .first_active()
        .ok_or(Rejection::NoActiveDeployment)?
        .environment_url()
        .ok_or(Rejection::NoEnvironmentUrl)
}

/// Parses the manifest of every plugin folder, in listing order.
///
/// Folders whose manifest has no text or fails to parse are skipped.
/// A folder with no manifest file at all rejects the repository.
fn collect_manifests<'a>(
    repository: &str,
    plugins_dir: &'a Tree<FolderObject>,
) -> Result<Vec<(&'a str, PluginManifest)>, Rejection> {
    let mut manifests = Vec::new();

    for folder in plugins_dir.entries.iter().filter(|entry| entry.is_tree()) {
        let manifest_file = folder
            .object
            .iter()
            .flat_map(|object| object.entries.iter())
            .find(|child| child.is_blob() && child.name == MANIFEST_FILE)
            .ok_or_else(|| Rejection::MissingManifest {
                folder: folder.name.clone(),
            })?;

        let text = match manifest_file.text() {
            Some(text) if !text.is_empty() => text,
            _ => {
                debug!(repo = repository, folder = %folder.name, "Manifest has no text, skipping");
                continue;
            }
        };

        match PluginManifest::parse(text) {
            Ok(manifest) => manifests.push((folder.name.as_str(), manifest)),
            Err(e) => {
                debug!(
                    repo = repository,
                    folder = %folder.name,
                    error = %e,
                    "Failed to parse manifest, skipping"
                );
            }
        }
    }

    Ok(manifests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        Deployment, DeploymentState, DeploymentStatus, DeploymentStatusState, EntryKind,
        PageInfo, TreeEntry,
    };

    fn blob(name: &str, text: &str) -> TreeEntry<BlobObject> {
        TreeEntry {
            name: name.to_string(),
            kind: EntryKind::Blob,
            object: Some(BlobObject {
                text: Some(text.to_string()),
            }),
        }
    }

    fn folder(name: &str, children: Vec<TreeEntry<BlobObject>>) -> TreeEntry<FolderObject> {
        TreeEntry {
            name: name.to_string(),
            kind: EntryKind::Tree,
            object: Some(FolderObject { entries: children }),
        }
    }

    fn active(url: Option<&str>) -> Deployment {
        Deployment {
            state: DeploymentState::Active,
            latest_status: Some(DeploymentStatus {
                state: DeploymentStatusState::Success,
                environment_url: url.map(str::to_string),
            }),
        }
    }

    fn repository(
        name: &str,
        workflow: &str,
        deployments: Vec<Deployment>,
        folders: Vec<TreeEntry<FolderObject>>,
    ) -> RepositoryNode {
        RepositoryNode {
            name_with_owner: name.to_string(),
            deployments: Deployments { nodes: deployments },
            workflows: Some(Tree {
                entries: vec![blob("deploy.yml", workflow)],
            }),
            plugins: Some(Tree { entries: folders }),
        }
    }

    fn theme_folder() -> TreeEntry<FolderObject> {
        folder(
            "theme",
            vec![blob(
                "plugin.json",
                r#"{"name":"Theme","author":"alice","description":"A theme"}"#,
            )],
        )
    }

    fn alice() -> RepositoryNode {
        repository(
            "alice/plugins",
            "uses: lune-lang/setup@v1",
            vec![active(Some("https://alice.dev/"))],
            vec![theme_folder()],
        )
    }

    fn search(nodes: Vec<RepositoryNode>) -> SearchResult {
        SearchResult {
            nodes,
            page_info: PageInfo {
                has_next_page: false,
                end_cursor: None,
            },
        }
    }

    #[test]
    fn accepts_complete_repository() {
        let data = assess_repository(&alice()).unwrap();

        assert_eq!(data.name, "alice/plugins");
        assert_eq!(data.url, "https://alice.dev/");
        assert_eq!(data.plugins.len(), 1);
        assert_eq!(
            data.plugins[0].manifest,
            PluginManifest::new("Theme", "alice", "A theme")
        );
        assert_eq!(data.plugins[0].url.as_str(), "https://alice.dev/theme");
    }

    #[test]
    fn resolves_folder_against_base() {
        let repo = repository(
            "bar/repo",
            "lune",
            vec![active(Some("https://example.com/"))],
            vec![folder(
                "foo-plugin",
                vec![blob(
                    "plugin.json",
                    r#"{"name":"Foo","author":"bar","description":"baz"}"#,
                )],
            )],
        );

        let data = assess_repository(&repo).unwrap();
        assert_eq!(data.plugins[0].url.as_str(), "https://example.com/foo-plugin");
    }

    #[test]
    fn rejects_without_runtime_reference() {
        let mut repo = alice();
        repo.workflows = Some(Tree {
            entries: vec![blob("deploy.yml", "uses: actions/checkout@v4")],
        });

        assert_eq!(
            assess_repository(&repo),
            Err(Rejection::RuntimeNotReferenced)
        );
        assert!(extract_catalog(&search(vec![repo])).is_empty());
    }

    #[test]
    fn rejects_without_workflows() {
        let mut repo = alice();
        repo.workflows = None;

        assert_eq!(assess_repository(&repo), Err(Rejection::NoWorkflows));
    }

    #[test]
    fn runtime_reference_must_be_in_a_file() {
        let mut repo = alice();
        repo.workflows = Some(Tree {
            entries: vec![TreeEntry {
                name: "lune".to_string(),
                kind: EntryKind::Tree,
                object: Some(BlobObject { text: None }),
            }],
        });

        assert_eq!(
            assess_repository(&repo),
            Err(Rejection::RuntimeNotReferenced)
        );
    }

    #[test]
    fn rejects_without_active_deployment() {
        let mut repo = alice();
        repo.deployments.nodes[0].state = DeploymentState::Other;

        assert_eq!(assess_repository(&repo), Err(Rejection::NoActiveDeployment));
    }

    #[test]
    fn rejects_active_deployment_without_url() {
        let mut repo = alice();
        repo.deployments = Deployments {
            nodes: vec![active(None), active(Some("https://later.dev/"))],
        };

        assert_eq!(assess_repository(&repo), Err(Rejection::NoEnvironmentUrl));
    }

    #[test]
    fn rejects_unparseable_environment_url() {
        let mut repo = alice();
        repo.deployments = Deployments {
            nodes: vec![active(Some("not a url"))],
        };

        assert!(matches!(
            assess_repository(&repo),
            Err(Rejection::InvalidEnvironmentUrl { .. })
        ));
    }

    #[test]
    fn rejects_without_plugins_directory() {
        let mut repo = alice();
        repo.plugins = None;

        assert_eq!(assess_repository(&repo), Err(Rejection::NoPluginsDirectory));
    }

    #[test]
    fn invalid_manifest_skips_only_that_plugin() {
        let mut repo = alice();
        repo.plugins = Some(Tree {
            entries: vec![
                folder("broken", vec![blob("plugin.json", "{not json")]),
                theme_folder(),
            ],
        });

        let data = assess_repository(&repo).unwrap();
        assert_eq!(data.plugins.len(), 1);
        assert_eq!(data.plugins[0].manifest.name, "Theme");
    }

    #[test]
    fn only_invalid_manifests_drops_repository() {
        let mut repo = alice();
        repo.plugins = Some(Tree {
            entries: vec![folder("broken", vec![blob("plugin.json", "{not json")])],
        });

        assert_eq!(assess_repository(&repo), Err(Rejection::NoValidPlugins));
        assert!(extract_catalog(&search(vec![repo])).is_empty());
    }

    #[test]
    fn empty_manifest_skips_plugin() {
        let mut repo = alice();
        repo.plugins = Some(Tree {
            entries: vec![folder("empty", vec![blob("plugin.json", "")]), theme_folder()],
        });

        assert_eq!(assess_repository(&repo).unwrap().plugins.len(), 1);
    }

    #[test]
    fn missing_manifest_rejects_whole_repository() {
        let mut repo = alice();
        repo.plugins = Some(Tree {
            entries: vec![
                theme_folder(),
                folder("wip", vec![blob("index.ts", "export {}")]),
            ],
        });

        assert_eq!(
            assess_repository(&repo),
            Err(Rejection::MissingManifest {
                folder: "wip".to_string()
            })
        );
    }

    #[test]
    fn files_in_plugins_directory_are_ignored() {
        let mut repo = alice();
        repo.plugins = Some(Tree {
            entries: vec![
                TreeEntry {
                    name: "README.md".to_string(),
                    kind: EntryKind::Blob,
                    object: Some(FolderObject::default()),
                },
                theme_folder(),
            ],
        });

        assert_eq!(assess_repository(&repo).unwrap().plugins.len(), 1);
    }

    #[test]
    fn preserves_repository_and_plugin_order() {
        let mut second = alice();
        second.name_with_owner = "bob/plugins".to_string();
        second.plugins = Some(Tree {
            entries: vec![
                folder(
                    "zeta",
                    vec![blob(
                        "plugin.json",
                        r#"{"name":"Zeta","author":"bob","description":"z"}"#,
                    )],
                ),
                folder(
                    "alpha",
                    vec![blob(
                        "plugin.json",
                        r#"{"name":"Alpha","author":"bob","description":"a"}"#,
                    )],
                ),
            ],
        });
        let mut rejected = alice();
        rejected.name_with_owner = "carol/plugins".to_string();
        rejected.workflows = None;

        let (catalog, summary) =
            extract_with_summary(&search(vec![second, rejected, alice()]));

        let names: Vec<_> = catalog.iter().map(|repo| repo.name.as_str()).collect();
        assert_eq!(names, ["bob/plugins", "alice/plugins"]);

        let plugins: Vec<_> = catalog[0]
            .plugins
            .iter()
            .map(|plugin| plugin.manifest.name.as_str())
            .collect();
        assert_eq!(plugins, ["Zeta", "Alpha"]);

        assert_eq!(summary.repositories_scanned, 3);
        assert_eq!(summary.repositories_accepted, 2);
        assert_eq!(summary.plugins_found, 3);
        assert_eq!(summary.rejections.get("no-workflows"), Some(&1));
    }
}
