//! Collaborator traits the routers read content through.

use std::sync::Arc;

use crate::catalog::types::{ContentNode, ContentRef, Locale};
use crate::routing::context::RequestContext;

/// Read access to the content tree.
pub trait ContentRepository: Send + Sync {
    /// Load a content item. The draft version is ignored.
    fn get(&self, link: &ContentRef) -> Option<Arc<ContentNode>>;

    /// Direct children of `parent`, in repository order.
    fn children(&self, parent: &ContentRef) -> Vec<Arc<ContentNode>>;
}

/// Flat SEO path index.
pub trait SeoUriResolver: Send + Sync {
    /// Resolve a complete SEO path under `locale`.
    fn resolve(&self, path: &str, locale: &Locale) -> Option<ContentRef>;
}

/// Builds the structural (tree) virtual path of a node.
pub trait VirtualPathBuilder: Send + Sync {
    /// Returns `None` when the node is not reachable from the builder's root.
    fn build_path(
        &self,
        request: &RequestContext,
        node: &ContentNode,
        locale: &Locale,
    ) -> Option<String>;
}
