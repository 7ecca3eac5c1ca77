//! Partial router contract and the route table.
//!
//! # Responsibilities
//! - Define the contract a partial router fulfils (match and generate)
//! - Keep registered routers in registration order
//! - Make registration idempotent per router name
//!
//! # Design Decisions
//! - Routers are shared via `Arc` and hold no per-request state
//! - A miss is `None`, so the next router can be tried
//! - First match wins (registration order)

use std::fmt;
use std::sync::Arc;

use crate::catalog::types::ContentNode;
use crate::routing::context::{PartialRouteData, UrlGeneratorContext, UrlResolverContext};

/// A router responsible for one part of the URL space.
pub trait PartialRouter: Send + Sync {
    /// Stable name used to deduplicate registrations.
    fn name(&self) -> &str;

    /// Match the remaining path of `ctx` below `content`.
    fn route_partial(
        &self,
        content: &ContentNode,
        ctx: &mut UrlResolverContext,
    ) -> Option<Arc<ContentNode>>;

    /// Generate the partial virtual path for `content`.
    fn partial_virtual_path(
        &self,
        content: &ContentNode,
        ctx: &mut UrlGeneratorContext,
    ) -> Option<PartialRouteData>;
}

/// Ordered set of partial routers.
#[derive(Clone, Default)]
pub struct RouteTable {
    routers: Vec<Arc<dyn PartialRouter>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a router. A router with the same name is replaced in place.
    ///
    /// Returns true when an existing registration was replaced.
    pub fn register(&mut self, router: Arc<dyn PartialRouter>) -> bool {
        match self.routers.iter_mut().find(|r| r.name() == router.name()) {
            Some(existing) => {
                tracing::debug!(router = router.name(), "Replacing partial router");
                *existing = router;
                true
            }
            None => {
                tracing::debug!(router = router.name(), "Registering partial router");
                self.routers.push(router);
                false
            }
        }
    }

    pub fn routers(&self) -> &[Arc<dyn PartialRouter>] {
        &self.routers
    }

    pub fn len(&self) -> usize {
        self.routers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.routers.iter().map(|r| r.name()))
            .finish()
    }
}
