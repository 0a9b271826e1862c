//! Navigation effects
//!
//! [`BrowserRouter`] binds the route state to an external base router (the
//! [`RouteActivator`]) and to a [`History`] installed on activation.
//!
//! Navigation is a two-state machine: idle, or navigating to a URL. Starting a navigation
//! to the URL already in flight resolves to [`NavigationOutcome::Cancelled`] without
//! calling the activator. A navigation to a different URL is not guarded here; the
//! activator owns that case. The recorded URL is cleared once the navigation settles,
//! whatever its result.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use trailmark_router::{Parameters, RouteId};

use crate::config::Config;
use crate::error::{NavigationError, Result};
use crate::history::History;
use crate::selectors;
use crate::state::{AddRoute, BeginNavigation, FinishNavigation, RouterState, SetActive};
use crate::store::Store;

/// How a navigation settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The route was activated
    Activated,
    /// The navigation was dropped, either by the re-entrancy guard or by the activator
    Cancelled,
}

impl NavigationOutcome {
    pub fn is_cancelled(self) -> bool {
        self == NavigationOutcome::Cancelled
    }
}

/// External base router that performs route activation
#[async_trait]
pub trait RouteActivator: Send + Sync {
    /// Activate `route_id` with its typed parameters
    ///
    /// Returns [`NavigationOutcome::Cancelled`] when the activation was superseded or
    /// refused without failing.
    async fn activate_route(
        &self,
        route_id: RouteId,
        parameters: Parameters,
    ) -> anyhow::Result<NavigationOutcome>;
}

/// Router module bound to a base router and a browser history
pub struct BrowserRouter {
    store: Store<RouterState>,
    activator: Arc<dyn RouteActivator>,
    history: RwLock<Option<Arc<dyn History>>>,
    push_history: bool,
}

impl BrowserRouter {
    pub fn new(activator: Arc<dyn RouteActivator>) -> Self {
        Self {
            store: Store::new(RouterState::new()),
            activator,
            history: RwLock::new(None),
            push_history: true,
        }
    }

    /// Whether id-based navigation pushes its URL to history (default: true)
    pub fn with_push_history(mut self, push_history: bool) -> Self {
        self.push_history = push_history;
        self
    }

    /// Builds a router and registers the configured routes in order
    pub fn from_config(config: &Config, activator: Arc<dyn RouteActivator>) -> Result<Self> {
        let router = Self::new(activator).with_push_history(config.navigation.push_history);
        for template in &config.routes {
            router.add_route(template)?;
        }
        info!(routes = router.state().routes().len(), "router configured");
        Ok(router)
    }

    pub fn store(&self) -> &Store<RouterState> {
        &self.store
    }

    /// Snapshot of the current router state
    pub fn state(&self) -> Arc<RouterState> {
        self.store.state()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Registers `template`; see [`AddRoute`]
    pub fn add_route(&self, template: &str) -> Result<RouteId> {
        Ok(self.store.commit(AddRoute::new(template))?)
    }

    /// Installs `history` and marks the router active
    pub async fn activate(&self, history: Arc<dyn History>) -> Result<()> {
        debug!(history = history.name(), "activating router");
        *self.history.write().await = Some(history);
        Ok(self.store.commit(SetActive(true))?)
    }

    /// Drops the installed history and marks the router inactive
    pub async fn deactivate(&self) -> Result<()> {
        debug!("deactivating router");
        *self.history.write().await = None;
        Ok(self.store.commit(SetActive(false))?)
    }

    // ========================================================================
    // Selectors
    // ========================================================================

    pub fn route_id_and_parameters_by_url(&self, url: &str) -> Option<(RouteId, Parameters)> {
        selectors::route_id_and_parameters_by_url(&self.state(), url)
    }

    pub fn href(&self, route_id: RouteId, parameters: &Parameters) -> Result<String> {
        Ok(selectors::href(&self.state(), route_id, parameters)?)
    }

    // ========================================================================
    // Effects
    // ========================================================================

    /// Resolves `url` and activates the matching route
    ///
    /// Fails with [`NavigationError::NoMatch`] when no route matches. Nothing is pushed to
    /// history.
    pub async fn navigate_to_route_by_url(&self, url: &str) -> Result<NavigationOutcome> {
        let (route_id, parameters) = self
            .route_id_and_parameters_by_url(url)
            .ok_or_else(|| NavigationError::NoMatch(url.to_string()))?;

        self.navigate(url.to_string(), route_id, parameters, None).await
    }

    /// Activates `route_id` and pushes its URL once the activation succeeds
    ///
    /// Fails with [`NavigationError::Inactive`] before [`BrowserRouter::activate`] has
    /// installed a history. A cancelled activation pushes nothing.
    pub async fn navigate_to_route_by_id_and_push_url(
        &self,
        route_id: RouteId,
        parameters: Parameters,
    ) -> Result<NavigationOutcome> {
        let url = self.href(route_id, &parameters)?;
        let history = self
            .history
            .read()
            .await
            .clone()
            .ok_or(NavigationError::Inactive)?;

        let history = self.push_history.then_some(history);
        self.navigate(url, route_id, parameters, history).await
    }

    async fn navigate(
        &self,
        url: String,
        route_id: RouteId,
        parameters: Parameters,
        history: Option<Arc<dyn History>>,
    ) -> Result<NavigationOutcome> {
        if !self.store.commit(BeginNavigation { url: url.clone() })? {
            info!(%url, "navigation already in flight, cancelled");
            return Ok(NavigationOutcome::Cancelled);
        }

        info!(%url, %route_id, "navigation started");
        let result = self.activate_and_push(&url, route_id, parameters, history).await;
        self.store.commit(FinishNavigation)?;

        match &result {
            Ok(outcome) => info!(%url, ?outcome, "navigation finished"),
            Err(err) => warn!(%url, error = %err, "navigation failed"),
        }
        result
    }

    async fn activate_and_push(
        &self,
        url: &str,
        route_id: RouteId,
        parameters: Parameters,
        history: Option<Arc<dyn History>>,
    ) -> Result<NavigationOutcome> {
        let outcome = self
            .activator
            .activate_route(route_id, parameters)
            .await
            .map_err(NavigationError::Activation)?;

        if outcome == NavigationOutcome::Activated {
            if let Some(history) = history {
                history.push(url).await.map_err(NavigationError::History)?;
            }
        }
        Ok(outcome)
    }
}
