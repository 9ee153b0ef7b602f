//! Deployment records attached to a repository.

use serde::Deserialize;

/// Connection wrapper around the deployment list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Deployments {
    pub nodes: Vec<Deployment>,
}

/// A single deployment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Whether the deployment is currently serving.
    pub state: DeploymentState,

    /// Most recent status. GitHub reports `null` for deployments that never
    /// received a status.
    pub latest_status: Option<DeploymentStatus>,
}

/// Outer deployment state. Only `ACTIVE` matters for discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentState {
    Active,
    #[serde(other)]
    Other,
}

/// Latest status of a deployment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStatus {
    /// Outcome of the latest status. Not consulted when picking a deployment.
    pub state: DeploymentStatusState,

    /// Public URL the deployment serves from.
    pub environment_url: Option<String>,
}

/// Inner deployment status state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentStatusState {
    Success,
    #[serde(other)]
    Other,
}

impl Deployments {
    /// Returns the first deployment whose outer state is `ACTIVE`.
    ///
    /// The latest status state is deliberately not checked, so an active
    /// deployment whose last status failed is still selected.
    pub fn first_active(&self) -> Option<&Deployment> {
        self.nodes
            .iter()
            .find(|deployment| deployment.state == DeploymentState::Active)
    }
}

impl Deployment {
    /// Environment URL of the latest status, if any.
    pub fn environment_url(&self) -> Option<&str> {
        self.latest_status
            .as_ref()
            .and_then(|status| status.environment_url.as_deref())
    }
}
