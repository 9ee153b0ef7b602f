//! Installed plugin error types.

use thiserror::Error;

/// Errors that can occur while managing installed plugins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingError {
    /// The reserved dev-mode plugin cannot be removed.
    #[error("plugin '{id}' is reserved and cannot be removed")]
    ReservedPlugin { id: String },

    /// The host failed to carry out the request.
    #[error("plugin host failed for '{id}': {message}")]
    Host { id: String, message: String },
}
