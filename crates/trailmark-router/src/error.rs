//! Error types for template parsing, route registration and href generation.

use thiserror::Error;

use crate::RouteId;

/// Errors raised by the routing core
///
/// Lookup misses are not errors: [`crate::RouteTree::find`] returns `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// Two templates would be ambiguous at the same tree position
    #[error("route template '{incoming}' conflicts with already registered template '{existing}'")]
    TemplateConflict { existing: String, incoming: String },

    /// A `:type` suffix that is not one of the supported parameter types
    #[error("unknown parameter type '{type_name}' in template '{template}'")]
    UnknownParameterType { template: String, type_name: String },

    /// A parameter declaration with nothing before the type separator
    #[error("empty parameter name in template '{template}'")]
    EmptyParameterName { template: String },

    /// Href rendering needs a value for every path parameter
    #[error("missing value for path parameter '{name}' of template '{template}'")]
    MissingPathParameter { template: String, name: String },

    /// No route registered under this id
    #[error("no route registered with id {0}")]
    UnknownRoute(RouteId),

    /// Every route id is already taken
    #[error("route ids exhausted at {count} registered routes")]
    RouteIdsExhausted { count: usize },
}

/// Result alias for the routing core
pub type Result<T> = std::result::Result<T, RouterError>;
