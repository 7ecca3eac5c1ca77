//! Market-agnostic hierarchical catalog routing.
//!
//! # Responsibilities
//! - Hold the route starting point and the commerce root
//! - Flat lookup through the SEO index
//! - Segment-by-segment walk down the catalog tree
//! - Structural path generation through the path builder
//!
//! # Design Decisions
//! - The starting point is a function so site changes apply on the next call
//! - The walk only descends into catalog content, never into pages
//! - Segments compare case-insensitively

use std::sync::Arc;

use crate::catalog::repository::{ContentRepository, SeoUriResolver, VirtualPathBuilder};
use crate::catalog::types::{ContentNode, ContentRef, Locale};
use crate::routing::context::RequestContext;
use crate::routing::segment::{PathCursor, SEPARATOR};

/// Evaluated on every call to find the page catalog routes hang off.
pub type RouteStartingPoint = Arc<dyn Fn() -> ContentRef + Send + Sync>;

/// Matches and generates catalog paths over a plain content tree.
pub struct HierarchicalCatalogRouter {
    starting_point: RouteStartingPoint,
    commerce_root: ContentRef,
    repository: Arc<dyn ContentRepository>,
    seo_resolver: Arc<dyn SeoUriResolver>,
    path_builder: Arc<dyn VirtualPathBuilder>,
}

impl HierarchicalCatalogRouter {
    pub fn new(
        starting_point: RouteStartingPoint,
        commerce_root: ContentRef,
        repository: Arc<dyn ContentRepository>,
        seo_resolver: Arc<dyn SeoUriResolver>,
        path_builder: Arc<dyn VirtualPathBuilder>,
    ) -> Self {
        Self {
            starting_point,
            commerce_root,
            repository,
            seo_resolver,
            path_builder,
        }
    }

    pub fn route_starting_point(&self) -> ContentRef {
        (self.starting_point)()
    }

    pub fn commerce_root(&self) -> ContentRef {
        self.commerce_root
    }

    /// Only catalog content is routed here.
    pub fn is_valid_routed_content(&self, content: &ContentNode) -> bool {
        content.kind.is_catalog_content()
    }

    /// Resolve the whole remaining path against the flat SEO index.
    pub fn content_by_seo_uri(
        &self,
        cursor: PathCursor<'_>,
        locale: &Locale,
    ) -> Option<Arc<ContentNode>> {
        let path = cursor.rest().trim_matches(SEPARATOR);
        if path.is_empty() {
            return None;
        }
        let link = self.seo_resolver.resolve(path, locale)?;
        self.repository
            .get(&link)
            .filter(|node| self.is_valid_routed_content(node))
    }

    /// Walk from `root`, consuming one segment per level until the path is
    /// exhausted. Any unmatched segment is a miss.
    pub fn content_recursive(
        &self,
        root: &ContentRef,
        cursor: PathCursor<'_>,
        locale: &Locale,
    ) -> Option<Arc<ContentNode>> {
        let mut parent = *root;
        let mut cursor = cursor;
        let mut matched = None;

        while !cursor.is_exhausted() {
            let (segment, next) = cursor.advance();
            if segment.is_empty() {
                return None;
            }
            let child = self
                .repository
                .children(&parent)
                .into_iter()
                .filter(|child| self.is_valid_routed_content(child))
                .find(|child| child.url_segment(locale).eq_ignore_ascii_case(segment))?;

            parent = child.link;
            matched = Some(child);
            cursor = next;
        }

        matched
    }

    /// Structural path of `content` below the commerce root.
    pub fn virtual_path(
        &self,
        request: &RequestContext,
        content: &ContentNode,
        locale: &Locale,
    ) -> Option<String> {
        self.path_builder.build_path(request, content, locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::InMemoryCatalog;
    use crate::catalog::path::StructuralPathBuilder;
    use crate::catalog::types::ContentKind;

    fn router() -> HierarchicalCatalogRouter {
        let catalog = Arc::new(
            InMemoryCatalog::from_nodes(vec![
                ContentNode::new(1, None, ContentKind::Page, "Home", "home"),
                ContentNode::new(10, None, ContentKind::Catalog, "Catalog", "catalog"),
                ContentNode::new(20, Some(10.into()), ContentKind::Category, "Shoes", "shoes"),
                ContentNode::new(21, Some(20.into()), ContentKind::Category, "Running", "running")
                    .with_segment("sv", "lopning"),
                ContentNode::new(30, Some(21.into()), ContentKind::Product, "Model X", "model-x")
                    .with_seo_uri("en", "model-x-shoe"),
                ContentNode::new(40, Some(20.into()), ContentKind::Page, "Guide", "guide")
                    .with_seo_uri("en", "shoe-guide"),
            ])
            .unwrap(),
        );
        let root = ContentRef::new(10);
        HierarchicalCatalogRouter::new(
            Arc::new(|| ContentRef::new(1)),
            root,
            catalog.clone(),
            catalog.clone(),
            Arc::new(StructuralPathBuilder::new(catalog, root)),
        )
    }

    #[test]
    fn test_walk_matches_each_level() {
        let router = router();
        let en = Locale::new("en");
        let node = router
            .content_recursive(&router.commerce_root(), PathCursor::new("shoes/Running/model-x"), &en)
            .unwrap();
        assert_eq!(node.link, ContentRef::new(30));

        let node = router
            .content_recursive(&router.commerce_root(), PathCursor::new("shoes/running/"), &en)
            .unwrap();
        assert_eq!(node.link, ContentRef::new(21));
    }

    #[test]
    fn test_walk_uses_locale_segments() {
        let router = router();
        let sv = Locale::new("sv");
        let node = router
            .content_recursive(&router.commerce_root(), PathCursor::new("shoes/lopning"), &sv)
            .unwrap();
        assert_eq!(node.link, ContentRef::new(21));
        assert!(router
            .content_recursive(&router.commerce_root(), PathCursor::new("shoes/running"), &sv)
            .is_none());
    }

    #[test]
    fn test_walk_misses() {
        let router = router();
        let en = Locale::new("en");
        let root = router.commerce_root();
        assert!(router.content_recursive(&root, PathCursor::new("shoes/hiking"), &en).is_none());
        assert!(router.content_recursive(&root, PathCursor::new("shoes//running"), &en).is_none());
        assert!(router.content_recursive(&root, PathCursor::new("shoes/guide"), &en).is_none());
        assert!(router.content_recursive(&root, PathCursor::new(""), &en).is_none());
    }

    #[test]
    fn test_flat_lookup() {
        let router = router();
        let en = Locale::new("en");
        let node = router.content_by_seo_uri(PathCursor::new("model-x-shoe/"), &en).unwrap();
        assert_eq!(node.link, ContentRef::new(30));
        assert!(router.content_by_seo_uri(PathCursor::new("shoe-guide"), &en).is_none());
        assert!(router.content_by_seo_uri(PathCursor::new(""), &en).is_none());
    }

    #[test]
    fn test_virtual_path() {
        let router = router();
        let en = Locale::new("en");
        let running = ContentNode::new(21, Some(20.into()), ContentKind::Category, "Running", "running");
        assert_eq!(
            router.virtual_path(&RequestContext::new(), &running, &en),
            Some("shoes/running".to_string())
        );
    }
}
