//! Persistent prefix tree of registered routes
//!
//! Keyed by path segment, with routes stored at the node where their path ends.
//! Every insert returns a new tree that shares unchanged subtrees with the old one, and a
//! no-op insert returns a tree that is pointer-equal to the original.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::param::Parameters;
use crate::path::{parse_query, split_path, split_url};
use crate::{RouteId, RouteTemplate};

mod node;
pub use node::{RouteLeaf, RouteTreeNode};

/// Result of matching a URL against the tree
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    pub route_id: RouteId,
    /// Coerced path parameters plus every query parameter present in the URL
    pub parameters: Parameters,
    pub template: Arc<RouteTemplate>,
}

/// Immutable route tree
///
/// # Examples
///
/// ```
/// use trailmark_router::{ParameterValue, RouteId, RouteTree};
///
/// let tree = RouteTree::new()
///     .insert(RouteId::new(1), "users/:id:number")
///     .unwrap();
///
/// let found = tree.find("/users/42").unwrap();
/// assert_eq!(found.route_id, RouteId::new(1));
/// assert_eq!(found.parameters["id"], ParameterValue::Number(42));
/// assert!(tree.find("/users/abc").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RouteTree {
    root: Arc<RouteTreeNode>,
    len: usize,
}

impl Default for RouteTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTree {
    pub fn new() -> Self {
        Self {
            root: Arc::new(RouteTreeNode::root()),
            len: 0,
        }
    }

    pub fn root(&self) -> &RouteTreeNode {
        &self.root
    }

    /// Number of registered routes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether two trees share the same root (no insert happened between them)
    pub fn ptr_eq(a: &RouteTree, b: &RouteTree) -> bool {
        Arc::ptr_eq(&a.root, &b.root)
    }

    /// Parses `template` and inserts it under `route_id`
    ///
    /// Fails with [`crate::RouterError::TemplateConflict`] when the template would be
    /// ambiguous with a route already ending at the same node.
    pub fn insert(&self, route_id: RouteId, template: &str) -> Result<RouteTree> {
        let template = RouteTemplate::parse(template)?;
        self.insert_template(route_id, Arc::new(template))
    }

    /// Inserts an already parsed template
    ///
    /// Re-registering a route id at the same node is a no-op and returns a pointer-equal tree.
    pub fn insert_template(&self, route_id: RouteId, template: Arc<RouteTemplate>) -> Result<RouteTree> {
        let leaf = RouteLeaf {
            route_id,
            template: Arc::clone(&template),
        };

        match node::insert(&self.root, &template.path_segments, &leaf)? {
            Some(root) => {
                debug!(route_id = %route_id, template = %template.source, "route registered");
                Ok(RouteTree {
                    root,
                    len: self.len + 1,
                })
            }
            None => {
                debug!(route_id = %route_id, template = %template.source, "route already registered");
                Ok(self.clone())
            }
        }
    }

    /// Matches a URL (path plus optional query string) against every registered route
    ///
    /// Returns `None` when no route matches; that is a normal outcome, not an error.
    pub fn find(&self, url: &str) -> Option<RouteMatch> {
        let (path, query) = split_url(url);
        let segments = split_path(path);
        let query = query.map(parse_query).unwrap_or_default();

        let found = node::find(&self.root, &segments, &segments, &query).map(|binding| RouteMatch {
            route_id: binding.leaf.route_id,
            parameters: binding.parameters,
            template: Arc::clone(&binding.leaf.template),
        });

        if found.is_none() {
            debug!(url, "no route matches");
        }
        found
    }
}
