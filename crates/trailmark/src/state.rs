//! Router state and the mutations that evolve it
//!
//! `RouterState` is immutable: each mutation returns a new state, or the same `Arc` when
//! nothing changed. The route tree is derived from the route list and kept in step with it.

use std::sync::Arc;

use tracing::debug;
use trailmark_router::{RouteId, RouteTemplate, RouteTree, RouterError};

use crate::store::Mutation;

/// State owned by the router module
#[derive(Debug, Clone, Default)]
pub struct RouterState {
    /// Registered templates, route `n` at index `n - 1`
    routes: Vec<Arc<RouteTemplate>>,
    is_active: bool,
    /// URL of the navigation in flight, if any
    current_navigation_url: Option<String>,
    tree: RouteTree,
}

impl RouterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> &[Arc<RouteTemplate>] {
        &self.routes
    }

    /// Template registered under `route_id`
    pub fn template(&self, route_id: RouteId) -> Option<&Arc<RouteTemplate>> {
        route_id.index().and_then(|index| self.routes.get(index))
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn current_navigation_url(&self) -> Option<&str> {
        self.current_navigation_url.as_deref()
    }

    pub fn is_navigating(&self) -> bool {
        self.current_navigation_url.is_some()
    }

    pub fn tree(&self) -> &RouteTree {
        &self.tree
    }
}

// ============================================================================
// Mutations
// ============================================================================

/// Registers a template and yields its route id
///
/// A template that parses to an already registered one (`users` and `/users/`) yields
/// its existing id and leaves the state unchanged. Fails on template conflicts and
/// malformed templates.
#[derive(Debug, Clone)]
pub struct AddRoute {
    pub template: String,
}

impl AddRoute {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl Mutation<RouterState> for AddRoute {
    type Output = RouteId;

    fn apply(self, state: &Arc<RouterState>) -> Result<(Arc<RouterState>, RouteId), RouterError> {
        let template = RouteTemplate::parse(&self.template)?;
        if let Some(index) = state.routes.iter().position(|existing| {
            existing.path_segments == template.path_segments
                && existing.query_parameters == template.query_parameters
        }) {
            debug!(template = %self.template, "template already registered");
            let route_id = route_id_at(index)?;
            return Ok((Arc::clone(state), route_id));
        }

        let route_id = route_id_at(state.routes.len())?;
        let template = Arc::new(template);
        let tree = state.tree.insert_template(route_id, Arc::clone(&template))?;

        let mut next = RouterState::clone(state);
        next.routes.push(template);
        next.tree = tree;
        Ok((Arc::new(next), route_id))
    }
}

fn route_id_at(index: usize) -> Result<RouteId, RouterError> {
    RouteId::from_index(index).ok_or(RouterError::RouteIdsExhausted { count: index })
}

/// Marks the router active or inactive
#[derive(Debug, Clone, Copy)]
pub struct SetActive(pub bool);

impl Mutation<RouterState> for SetActive {
    type Output = ();

    fn apply(self, state: &Arc<RouterState>) -> Result<(Arc<RouterState>, ()), RouterError> {
        if state.is_active == self.0 {
            return Ok((Arc::clone(state), ()));
        }
        let mut next = RouterState::clone(state);
        next.is_active = self.0;
        Ok((Arc::new(next), ()))
    }
}

/// Records the URL of a navigation about to start
///
/// Yields `false`, leaving the state unchanged, when a navigation to the same URL is
/// already in flight. A different URL replaces the recorded one.
#[derive(Debug, Clone)]
pub struct BeginNavigation {
    pub url: String,
}

impl Mutation<RouterState> for BeginNavigation {
    type Output = bool;

    fn apply(self, state: &Arc<RouterState>) -> Result<(Arc<RouterState>, bool), RouterError> {
        if state.current_navigation_url() == Some(self.url.as_str()) {
            return Ok((Arc::clone(state), false));
        }
        let mut next = RouterState::clone(state);
        next.current_navigation_url = Some(self.url);
        Ok((Arc::new(next), true))
    }
}

/// Clears the recorded navigation URL, whichever navigation recorded it
#[derive(Debug, Clone, Copy)]
pub struct FinishNavigation;

impl Mutation<RouterState> for FinishNavigation {
    type Output = ();

    fn apply(self, state: &Arc<RouterState>) -> Result<(Arc<RouterState>, ()), RouterError> {
        if state.current_navigation_url.is_none() {
            return Ok((Arc::clone(state), ()));
        }
        let mut next = RouterState::clone(state);
        next.current_navigation_url = None;
        Ok((Arc::new(next), ()))
    }
}
