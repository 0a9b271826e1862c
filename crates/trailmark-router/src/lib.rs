//! # Trailmark Router
//!
//! Route-matching core for client-side routers:
//! - Typed route templates (`users/:id:number?tab[&page:number]`)
//! - A persistent prefix tree with conflict detection at registration time
//! - URL matching with typed coercion of path and query parameters
//! - Href generation with percent-encoding
//!
//! ## Functional Approach
//!
//! Every operation is a pure function over immutable values:
//! - **Structural sharing** with `Arc`: an insert copies only the changed path
//! - **Pointer equality** signals a no-op insert (`RouteTree::ptr_eq`)
//! - **Zero-copy splitting** of URLs into borrowed segments
//!
//! ## Example
//!
//! ```
//! use trailmark_router::{href, ParameterValue, RouteId, RouteTree};
//!
//! let tree = RouteTree::new()
//!     .insert(RouteId::new(1), "root/:name/intermediate/:count:number")
//!     .unwrap();
//!
//! let found = tree.find("/root/a/intermediate/1").unwrap();
//! assert_eq!(found.route_id, RouteId::new(1));
//! assert_eq!(found.parameters["count"], ParameterValue::Number(1));
//!
//! let url = href(&found.template, &found.parameters).unwrap();
//! assert_eq!(url, "/root/a/intermediate/1");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Module Declarations
// ============================================================================

pub mod error;
mod href;
pub mod param;
pub mod path;
pub mod template;
pub mod tree;

pub use error::{Result, RouterError};
pub use href::href;
pub use param::{coerce, is_well_formed, ParameterType, ParameterValue, Parameters};
pub use template::{PathSegment, QueryParameterSpec, RouteTemplate};
pub use tree::{RouteLeaf, RouteMatch, RouteTree, RouteTreeNode};

// ============================================================================
// Core Types
// ============================================================================

/// Identifier of a registered route
///
/// Ids are 1-based: route `n` is stored at index `n - 1` of a route list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(u32);

impl RouteId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Route id for a 0-based list index, `None` past the last representable id
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok()?.checked_add(1).map(Self)
    }

    /// 0-based list index, `None` for the invalid id 0
    pub fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RouteId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
