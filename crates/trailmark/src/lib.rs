//! # Trailmark
//!
//! Router module for applications built on an immutable state container:
//! - **State**: registered templates, the derived route tree, activation and the
//!   in-flight navigation URL, held in a [`Store`]
//! - **Mutations**: route registration and navigation bookkeeping
//! - **Selectors**: URL lookup and href generation
//! - **Effects**: URL and id based navigation through an external [`RouteActivator`]
//!
//! Route matching itself lives in [`trailmark_router`].
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use trailmark::{BrowserRouter, MemoryHistory, NavigationOutcome, RouteActivator};
//! use trailmark::{Parameters, ParameterValue, RouteId};
//!
//! struct Activator;
//!
//! #[async_trait]
//! impl RouteActivator for Activator {
//!     async fn activate_route(&self, _: RouteId, _: Parameters) -> anyhow::Result<NavigationOutcome> {
//!         Ok(NavigationOutcome::Activated)
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let router = BrowserRouter::new(Arc::new(Activator));
//! let users = router.add_route("users/:id:number").unwrap();
//!
//! let history = MemoryHistory::new();
//! router.activate(Arc::new(history.clone())).await.unwrap();
//!
//! let mut parameters = Parameters::new();
//! parameters.insert("id".into(), ParameterValue::Number(7));
//! let outcome = router.navigate_to_route_by_id_and_push_url(users, parameters).await.unwrap();
//!
//! assert_eq!(outcome, NavigationOutcome::Activated);
//! assert_eq!(history.entries().await, vec!["/users/7"]);
//! # });
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod navigation;
pub mod selectors;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{NavigationError, Result};
pub use history::{History, MemoryHistory};
pub use navigation::{BrowserRouter, NavigationOutcome, RouteActivator};
pub use state::{AddRoute, BeginNavigation, FinishNavigation, RouterState, SetActive};
pub use store::{Mutation, Store};

pub use trailmark_router::{
    ParameterType, ParameterValue, Parameters, RouteId, RouteTemplate, RouterError,
};
