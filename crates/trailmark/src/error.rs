//! Error types for the router module

use thiserror::Error;
use trailmark_router::RouterError;

/// Errors surfaced by route registration, selectors and navigation effects
#[derive(Debug, Error)]
pub enum NavigationError {
    /// Template conflicts, malformed templates, unknown route ids
    #[error(transparent)]
    Router(#[from] RouterError),

    /// No registered route matches the URL
    #[error("no route matches url '{0}'")]
    NoMatch(String),

    /// Id-based navigation needs a history installed by `activate`
    #[error("router is not active: no history installed")]
    Inactive,

    /// The external base router failed to activate the route
    #[error("route activation failed: {0}")]
    Activation(#[source] anyhow::Error),

    /// The history refused the pushed URL
    #[error("history push failed: {0}")]
    History(#[source] anyhow::Error),
}

/// Result alias for the router module
pub type Result<T> = std::result::Result<T, NavigationError>;
