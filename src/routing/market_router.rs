//! Market-aware catalog partial router.
//!
//! # Inbound
//! ```text
//! remaining path under the starting point
//!     → strip optional market segment (only enabled markets)
//!     → resolve locale (requested language, else ambient default)
//!     → flat SEO lookup
//!     → accept flat leaf hit when SEO-outgoing is on,
//!       otherwise walk the catalog tree from the commerce root
//!     → attach matched content to the resolver context
//! ```
//!
//! # Outbound
//! ```text
//! catalog content
//!     → SEO-outgoing + default mode + SEO path: "{seo}" under the start page
//!     → otherwise "{market}/{leaf SEO path | structural path}"
//! ```

use std::sync::Arc;

use crate::catalog::types::{ContentNode, Locale};
use crate::market::current::CurrentMarket;
use crate::market::service::MarketService;
use crate::observability::metrics;
use crate::routing::context::{
    ContentLanguageAccessor, ContextMode, PartialRouteData, UrlGeneratorContext,
    UrlResolverContext, CONTENT_LINK_KEY,
};
use crate::routing::hierarchical::HierarchicalCatalogRouter;
use crate::routing::router::PartialRouter;
use crate::routing::segment::{extract_market_segment, rewrite_for_context_mode, SEPARATOR};
use crate::routing::site::SiteDefinitionStore;

/// Name under which the router is registered.
pub const MARKET_CATALOG_ROUTER: &str = "market-catalog";

/// Wraps a [`HierarchicalCatalogRouter`] with market segment handling.
pub struct MarketCatalogRouter {
    inner: HierarchicalCatalogRouter,
    enable_outgoing_seo_uri: bool,
    markets: Arc<dyn MarketService>,
    current_market: Arc<dyn CurrentMarket>,
    language: Arc<dyn ContentLanguageAccessor>,
    site: Arc<SiteDefinitionStore>,
}

impl MarketCatalogRouter {
    pub fn new(
        inner: HierarchicalCatalogRouter,
        enable_outgoing_seo_uri: bool,
        markets: Arc<dyn MarketService>,
        current_market: Arc<dyn CurrentMarket>,
        language: Arc<dyn ContentLanguageAccessor>,
        site: Arc<SiteDefinitionStore>,
    ) -> Self {
        Self {
            inner,
            enable_outgoing_seo_uri,
            markets,
            current_market,
            language,
            site,
        }
    }

    pub fn enable_outgoing_seo_uri(&self) -> bool {
        self.enable_outgoing_seo_uri
    }

    pub fn inner(&self) -> &HierarchicalCatalogRouter {
        &self.inner
    }

    fn resolve_locale(&self, explicit: Option<&Locale>) -> Locale {
        explicit.cloned().unwrap_or_else(|| self.language.language())
    }
}

impl PartialRouter for MarketCatalogRouter {
    fn name(&self) -> &str {
        MARKET_CATALOG_ROUTER
    }

    fn route_partial(
        &self,
        content: &ContentNode,
        ctx: &mut UrlResolverContext,
    ) -> Option<Arc<ContentNode>> {
        tracing::debug!(
            content_id = %content.link,
            remaining = %ctx.remaining_path(),
            "Routing catalog content"
        );

        if !content.link.eq_ignore_work_id(&self.inner.route_starting_point()) {
            return None;
        }
        if ctx.cursor().peek().is_empty() {
            return None;
        }

        let known_markets = self.markets.enabled_market_ids();
        let (stripped, market) = extract_market_segment(ctx.remaining_path(), &known_markets);
        if let Some(market) = market {
            let stripped = stripped.to_string();
            tracing::debug!(market = %market, remaining = %stripped, "Market segment consumed");
            ctx.request.set_market(market);
            ctx.set_remaining_path(stripped);
            if ctx.cursor().peek().is_empty() {
                metrics::record_inbound("miss");
                return None;
            }
        }

        let locale = self.resolve_locale(ctx.requested_language.as_ref());
        let flat = self.inner.content_by_seo_uri(ctx.cursor(), &locale);

        let matched = match flat {
            Some(node) if self.enable_outgoing_seo_uri && node.is_leaf() => Some((node, "flat")),
            flat => match self
                .inner
                .content_recursive(&self.inner.commerce_root(), ctx.cursor(), &locale)
            {
                Some(node) => Some((node, "hierarchical")),
                // Leaf URLs generated while SEO-outgoing is off carry the
                // leaf's SEO path behind the market segment.
                None => flat.filter(|node| node.is_leaf()).map(|node| (node, "flat")),
            },
        };

        match matched {
            Some((node, outcome)) => {
                tracing::debug!(
                    content_id = %node.link,
                    locale = %locale,
                    outcome,
                    "Catalog content matched"
                );
                metrics::record_inbound(outcome);
                ctx.set_remaining_path(String::new());
                ctx.set_content(node.clone());
                Some(node)
            }
            None => {
                tracing::trace!(remaining = %ctx.remaining_path(), locale = %locale, "No catalog match");
                metrics::record_inbound("miss");
                None
            }
        }
    }

    fn partial_virtual_path(
        &self,
        content: &ContentNode,
        ctx: &mut UrlGeneratorContext,
    ) -> Option<PartialRouteData> {
        tracing::debug!(content_id = %content.link, mode = ?ctx.mode, "Generating catalog path");

        if !self.inner.is_valid_routed_content(content) {
            return None;
        }

        let locale = self.resolve_locale(ctx.language.as_ref());

        if self.enable_outgoing_seo_uri && ctx.mode == ContextMode::Default {
            if let Some(seo_uri) = content.seo_uri(&locale) {
                ctx.route_values.remove(CONTENT_LINK_KEY);
                metrics::record_outbound("seo");
                return Some(PartialRouteData {
                    base_path_root: self.site.current().start_or_root(),
                    partial_virtual_path: seo_uri.to_string(),
                });
            }
        }

        let market = self.current_market.current_market(&ctx.request).to_url_segment();

        let seo_path = content
            .seo_uri(&locale)
            .filter(|_| content.is_leaf())
            .map(str::to_string);
        let virtual_path = match seo_path {
            Some(path) => path,
            None => match self.inner.virtual_path(&ctx.request, content, &locale) {
                Some(path) => path,
                None => {
                    tracing::debug!(content_id = %content.link, "No virtual path for content");
                    metrics::record_outbound("miss");
                    return None;
                }
            },
        };

        // The requested link carries the work id of the version being edited.
        let link = if ctx.content_link.eq_ignore_work_id(&content.link) {
            ctx.content_link
        } else {
            content.link
        };
        let rewritten = rewrite_for_context_mode(&link, &virtual_path, ctx.mode);
        metrics::record_outbound("market");
        Some(PartialRouteData {
            base_path_root: self.inner.route_starting_point(),
            partial_virtual_path: format!(
                "{}{}{}",
                market,
                SEPARATOR,
                rewritten.trim_start_matches(SEPARATOR)
            ),
        })
    }
}
