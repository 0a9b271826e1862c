//! Selectors: pure reads over [`RouterState`]

use std::sync::Arc;

use trailmark_router::{Parameters, RouteId, RouteTemplate, RouterError};

use crate::state::RouterState;

/// Route id and typed parameters for `url`, or `None` when no route matches
pub fn route_id_and_parameters_by_url(state: &RouterState, url: &str) -> Option<(RouteId, Parameters)> {
    state
        .tree()
        .find(url)
        .map(|found| (found.route_id, found.parameters))
}

/// Template registered under `route_id`
pub fn template(state: &RouterState, route_id: RouteId) -> Result<&Arc<RouteTemplate>, RouterError> {
    state
        .template(route_id)
        .ok_or(RouterError::UnknownRoute(route_id))
}

/// Canonical URL of `route_id` for `parameters`
pub fn href(state: &RouterState, route_id: RouteId, parameters: &Parameters) -> Result<String, RouterError> {
    trailmark_router::href(template(state, route_id)?, parameters)
}
