//! Structured form of a route template
//!
//! Values here are immutable once parsed; the tree and href generator share them behind `Arc`.

use std::collections::BTreeSet;

use crate::ParameterType;

/// One `/`-separated piece of a template path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Matched by exact equality against the decoded URL segment
    Constant(String),
    /// `:name` or `:name:type`, matches any segment well-formed for its type
    Parameter {
        name: String,
        parameter_type: ParameterType,
    },
}

impl PathSegment {
    /// Sibling equivalence used by the route tree
    ///
    /// Constants compare by value. Any parameter is equivalent to any other parameter,
    /// whatever its name or type.
    pub fn is_equivalent(&self, other: &PathSegment) -> bool {
        match (self, other) {
            (PathSegment::Constant(a), PathSegment::Constant(b)) => a == b,
            (PathSegment::Parameter { .. }, PathSegment::Parameter { .. }) => true,
            _ => false,
        }
    }
}

/// A declared query parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryParameterSpec {
    pub name: String,
    pub parameter_type: ParameterType,
    pub is_optional: bool,
}

/// Parsed, canonical form of a template string
///
/// # Examples
///
/// ```
/// use trailmark_router::{PathSegment, RouteTemplate};
///
/// let template = RouteTemplate::parse("/users/:id:number?tab[&page:number]").unwrap();
/// assert_eq!(template.path_segments.len(), 2);
/// assert_eq!(template.path_segments[0], PathSegment::Constant("users".into()));
/// assert_eq!(template.required_names().len(), 1);
/// assert_eq!(template.accepted_names().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    /// Template string as registered
    pub source: String,
    pub path_segments: Vec<PathSegment>,
    /// Required parameters first, then optional ones, each in template order
    pub query_parameters: Vec<QueryParameterSpec>,
}

impl RouteTemplate {
    pub fn required_query_parameters(&self) -> impl Iterator<Item = &QueryParameterSpec> {
        self.query_parameters.iter().filter(|spec| !spec.is_optional)
    }

    /// Names a query string must carry for this template to match
    pub fn required_names(&self) -> BTreeSet<&str> {
        self.required_query_parameters()
            .map(|spec| spec.name.as_str())
            .collect()
    }

    /// Names of every declared query parameter, required or optional
    pub fn accepted_names(&self) -> BTreeSet<&str> {
        self.query_parameters
            .iter()
            .map(|spec| spec.name.as_str())
            .collect()
    }

    /// Whether the template has no path segments
    pub fn is_root(&self) -> bool {
        self.path_segments.is_empty()
    }

    /// Whether a query string satisfying `self` could also satisfy `other`
    ///
    /// Two templates at the same path are ambiguous when either one's required names are
    /// all accepted by the other.
    pub fn is_ambiguous_with(&self, other: &RouteTemplate) -> bool {
        let accepted = self.accepted_names();
        let other_accepted = other.accepted_names();
        self.required_names().is_subset(&other_accepted)
            || other.required_names().is_subset(&accepted)
    }
}
