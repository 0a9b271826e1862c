//! Route tree nodes and the recursive insert/lookup over them
//!
//! Nodes are shared behind `Arc` and never mutated in place. An insert clones only the
//! nodes on the path it changes; every untouched subtree is reused by the new tree.

use std::sync::Arc;

use tracing::warn;

use crate::error::{Result, RouterError};
use crate::param::{coerce, decode, is_well_formed, Parameters};
use crate::path::RawQuery;
use crate::{PathSegment, RouteId, RouteTemplate};

/// A route registered at the node where its path ends
#[derive(Debug, Clone)]
pub struct RouteLeaf {
    pub route_id: RouteId,
    pub template: Arc<RouteTemplate>,
}

/// One structural position in the route tree
///
/// Sibling nodes never hold equivalent segments (see [`PathSegment::is_equivalent`]), so a
/// node has at most one parameter child. That child keeps the segment of the first route
/// that created it, and its type gates traversal; each route's own names and types are
/// bound again at the end of a match.
#[derive(Debug, Clone)]
pub struct RouteTreeNode {
    segment: PathSegment,
    children: Vec<Arc<RouteTreeNode>>,
    routes: Vec<RouteLeaf>,
}

impl RouteTreeNode {
    /// Root placeholder
    pub(crate) fn root() -> Self {
        Self::new(PathSegment::Constant(String::new()))
    }

    fn new(segment: PathSegment) -> Self {
        Self {
            segment,
            children: Vec::new(),
            routes: Vec::new(),
        }
    }

    pub fn segment(&self) -> &PathSegment {
        &self.segment
    }

    pub fn children(&self) -> &[Arc<RouteTreeNode>] {
        &self.children
    }

    /// Routes whose path ends at this node, in registration order
    pub fn routes(&self) -> &[RouteLeaf] {
        &self.routes
    }
}

// ============================================================================
// Insertion
// ============================================================================

/// Inserts `leaf` below `node`, following `remaining` path segments
///
/// Returns `Ok(None)` when the route id is already registered at the terminal node.
pub(crate) fn insert(
    node: &Arc<RouteTreeNode>,
    remaining: &[PathSegment],
    leaf: &RouteLeaf,
) -> Result<Option<Arc<RouteTreeNode>>> {
    let Some((segment, rest)) = remaining.split_first() else {
        return insert_leaf(node, leaf);
    };

    let position = node
        .children
        .iter()
        .position(|child| child.segment.is_equivalent(segment));

    let (index, child) = match position {
        Some(index) => match insert(&node.children[index], rest, leaf)? {
            Some(child) => (Some(index), child),
            None => return Ok(None),
        },
        None => (None, build_chain(segment, rest, leaf)),
    };

    let mut updated = RouteTreeNode::clone(node);
    match index {
        Some(index) => updated.children[index] = child,
        None => updated.children.push(child),
    }
    Ok(Some(Arc::new(updated)))
}

fn insert_leaf(node: &Arc<RouteTreeNode>, leaf: &RouteLeaf) -> Result<Option<Arc<RouteTreeNode>>> {
    if node
        .routes
        .iter()
        .any(|existing| existing.route_id == leaf.route_id)
    {
        return Ok(None);
    }

    if let Some(existing) = node
        .routes
        .iter()
        .find(|existing| existing.template.is_ambiguous_with(&leaf.template))
    {
        warn!(
            existing = %existing.template.source,
            incoming = %leaf.template.source,
            "route template conflict"
        );
        return Err(RouterError::TemplateConflict {
            existing: existing.template.source.clone(),
            incoming: leaf.template.source.clone(),
        });
    }

    let mut updated = RouteTreeNode::clone(node);
    updated.routes.push(leaf.clone());
    Ok(Some(Arc::new(updated)))
}

/// Fresh branch for segments no existing node covers
fn build_chain(segment: &PathSegment, rest: &[PathSegment], leaf: &RouteLeaf) -> Arc<RouteTreeNode> {
    let mut node = RouteTreeNode::new(segment.clone());
    match rest.split_first() {
        Some((next, rest)) => node.children.push(build_chain(next, rest, leaf)),
        None => node.routes.push(leaf.clone()),
    }
    Arc::new(node)
}

// ============================================================================
// Lookup
// ============================================================================

/// A route bound to concrete parameter values
pub(crate) struct Binding<'a> {
    pub leaf: &'a RouteLeaf,
    pub parameters: Parameters,
}

/// Depth-first search: constant children before the parameter child, first full match wins
///
/// The parameter child is only entered when its own type accepts the raw segment.
pub(crate) fn find<'a>(
    node: &'a RouteTreeNode,
    remaining: &[&str],
    segments: &[&str],
    query: &RawQuery,
) -> Option<Binding<'a>> {
    let Some((raw, rest)) = remaining.split_first() else {
        return select_route(node, segments, query);
    };

    let decoded = decode(raw);
    let constants = node
        .children
        .iter()
        .filter(|child| matches!(&child.segment, PathSegment::Constant(value) if *value == decoded));
    let parameters = node.children.iter().filter(|child| match &child.segment {
        PathSegment::Parameter { parameter_type, .. } => is_well_formed(Some(*raw), *parameter_type),
        PathSegment::Constant(_) => false,
    });

    constants
        .chain(parameters)
        .find_map(|child| find(child, rest, segments, query))
}

/// Picks the route at `node` that satisfies the query with the most matched query parameters
///
/// Ties go to the route registered first.
fn select_route<'a>(
    node: &'a RouteTreeNode,
    segments: &[&str],
    query: &RawQuery,
) -> Option<Binding<'a>> {
    node.routes
        .iter()
        .filter_map(|leaf| {
            bind(&leaf.template, segments, query).map(|(parameters, matched)| {
                (Binding { leaf, parameters }, matched)
            })
        })
        .fold(None, |best: Option<(Binding<'a>, usize)>, (candidate, matched)| match best {
            Some((binding, best_matched)) if best_matched >= matched => Some((binding, best_matched)),
            _ => Some((candidate, matched)),
        })
        .map(|(binding, _)| binding)
}

/// Binds a template's parameters, returning them with the number of matched query parameters
///
/// Every path parameter and every present query parameter must be well-formed for its
/// declared type, and every required query parameter must be present.
fn bind(template: &RouteTemplate, segments: &[&str], query: &RawQuery) -> Option<(Parameters, usize)> {
    let mut parameters = Parameters::new();

    for (segment, &raw) in template.path_segments.iter().zip(segments) {
        if let PathSegment::Parameter {
            name,
            parameter_type,
        } = segment
        {
            if !is_well_formed(Some(raw), *parameter_type) {
                return None;
            }
            parameters.insert(name.clone(), coerce(raw, *parameter_type));
        }
    }

    let mut matched = 0;
    for spec in &template.query_parameters {
        match query.get(&spec.name) {
            Some(raw) => {
                if !is_well_formed(Some(raw.as_str()), spec.parameter_type) {
                    return None;
                }
                parameters.insert(spec.name.clone(), coerce(raw, spec.parameter_type));
                matched += 1;
            }
            None if spec.is_optional => {}
            None => return None,
        }
    }

    Some((parameters, matched))
}
