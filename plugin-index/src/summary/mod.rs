//! Extraction summary.

use crate::catalog::RepositoryData;
use crate::extractor::Rejection;
use serde::Serialize;
use std::collections::BTreeMap;

/// Tally of a single extraction pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionSummary {
    /// Number of repositories in the search page.
    pub repositories_scanned: usize,

    /// Number of repositories that made it into the catalog.
    pub repositories_accepted: usize,

    /// Total plugins across accepted repositories.
    pub plugins_found: usize,

    /// Rejected repositories, keyed by [`Rejection::reason`].
    pub rejections: BTreeMap<&'static str, usize>,

    /// Whether the search reported further pages that were not read.
    pub more_results_available: bool,
}

impl ExtractionSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(more_results_available: bool) -> Self {
        Self {
            more_results_available,
            ..Default::default()
        }
    }

    /// Records an accepted repository.
    pub fn record_accepted(&mut self, repository: &RepositoryData) {
        self.repositories_scanned += 1;
        self.repositories_accepted += 1;
        self.plugins_found += repository.plugins.len();
    }

    /// Records a rejected repository.
    pub fn record_rejected(&mut self, rejection: &Rejection) {
        self.repositories_scanned += 1;
        *self.rejections.entry(rejection.reason()).or_default() += 1;
    }

    /// Number of rejected repositories.
    #[must_use]
    pub fn repositories_rejected(&self) -> usize {
        self.rejections.values().sum()
    }
}
