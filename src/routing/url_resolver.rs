//! Full-path routing and URL generation over the route table.
//!
//! # Responsibilities
//! - Route a request path from the start page through the partial routers
//! - Generate URLs: cache lookup, partial path, base path, cache fill
//! - Invalidate cached URLs when content or the site definition changes
//!
//! # Design Decisions
//! - The cache is optional; generation works without one
//! - Cached values are complete URLs, keyed by generation context and options
//! - Route values left after generation become the query string
//! - Every invalidation bumps an epoch; a URL built across an epoch change is
//!   dropped again right after it is cached

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::cache::key::{GeneratedUrl, UrlCacheContext, UrlCacheKey};
use crate::cache::ContentUrlCache;
use crate::catalog::repository::ContentRepository;
use crate::catalog::types::{ContentNode, ContentRef, Locale};
use crate::market::types::MarketId;
use crate::observability::tracing::request_span;
use crate::routing::context::{
    RequestContext, UrlGeneratorContext, UrlGeneratorOptions, UrlResolverContext,
    CONTENT_LINK_KEY,
};
use crate::routing::router::RouteTable;
use crate::routing::segment::SEPARATOR;
use crate::routing::site::{SiteDefinition, SiteDefinitionStore};

const MAX_PAGE_DEPTH: usize = 64;

/// Outcome of routing a request path.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub content: Arc<ContentNode>,
    /// Market selected by the path, if it named one.
    pub market: Option<MarketId>,
}

/// Entry point for inbound routing and outbound URL generation.
pub struct UrlResolver {
    routes: RouteTable,
    repository: Arc<dyn ContentRepository>,
    site: Arc<SiteDefinitionStore>,
    cache: Option<Arc<dyn ContentUrlCache>>,
    /// Bumped before every removal from the cache.
    epoch: AtomicU64,
}

impl UrlResolver {
    pub fn new(
        routes: RouteTable,
        repository: Arc<dyn ContentRepository>,
        site: Arc<SiteDefinitionStore>,
        cache: Option<Arc<dyn ContentUrlCache>>,
    ) -> Self {
        Self {
            routes,
            repository,
            site,
            cache,
            epoch: AtomicU64::new(0),
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Route `path` to content. An empty path is the start page.
    pub fn route(
        &self,
        request: RequestContext,
        path: &str,
        language: Option<Locale>,
    ) -> Option<ResolvedRoute> {
        let span = request_span(&request, "route");
        let _enter = span.enter();

        let start = self.site.current().start_or_root();
        let start_node = self.repository.get(&start)?;

        let path = path.trim_matches(SEPARATOR);
        if path.is_empty() {
            return Some(ResolvedRoute {
                content: start_node,
                market: request.market().cloned(),
            });
        }

        for router in self.routes.routers() {
            let mut ctx = UrlResolverContext::new(request.clone(), path)
                .with_language(language.clone());
            let Some(content) = router.route_partial(&start_node, &mut ctx) else {
                continue;
            };
            if !ctx.cursor().is_exhausted() {
                tracing::debug!(
                    router = router.name(),
                    remaining = %ctx.remaining_path(),
                    "Partial match left unconsumed segments"
                );
                continue;
            }
            tracing::debug!(router = router.name(), content_id = %content.link, "Path routed");
            return Some(ResolvedRoute {
                content,
                market: ctx.request.market().cloned(),
            });
        }

        tracing::debug!(path, "No route matched");
        None
    }

    /// Generate the URL for `ctx.content_link`.
    pub fn get_url(&self, ctx: UrlGeneratorContext, options: UrlGeneratorOptions) -> Option<String> {
        let span = request_span(&ctx.request, "get_url");
        let _enter = span.enter();

        let key = UrlCacheKey::new(UrlCacheContext::new(&ctx, options));
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&ctx.request, &key) {
                tracing::trace!(content_id = %ctx.content_link, url = %hit.url, "URL cache hit");
                return Some(hit.url);
            }
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        let content = self.repository.get(&ctx.content_link)?;
        let site = self.site.current();

        for router in self.routes.routers() {
            let mut attempt = ctx.clone();
            let Some(data) = router.partial_virtual_path(&content, &mut attempt) else {
                continue;
            };
            let Some(base) = self.base_path(&site, &data.base_path_root) else {
                tracing::warn!(
                    base_root = %data.base_path_root,
                    "Base page of generated path is not reachable from the site root"
                );
                continue;
            };

            let mut url = format!(
                "{}{}{}",
                base,
                data.partial_virtual_path.trim_start_matches(SEPARATOR),
                query_string(&attempt)
            );
            if options.force_absolute {
                if let Some(site_url) = &site.site_url {
                    url = format!("{}{}", site_url.trim_end_matches(SEPARATOR), url);
                }
            }

            if let Some(cache) = &self.cache {
                cache.insert(
                    &ctx.request,
                    GeneratedUrl {
                        url: url.clone(),
                        content_link: ctx.content_link,
                    },
                    key,
                );
                // Content or site changed while this URL was being built.
                if self.epoch.load(Ordering::SeqCst) != epoch {
                    tracing::debug!(content_id = %ctx.content_link, "Dropping URL built from stale state");
                    cache.remove(&ctx.content_link);
                }
            }
            tracing::debug!(router = router.name(), content_id = %ctx.content_link, url = %url, "URL generated");
            return Some(url);
        }

        tracing::debug!(content_id = %ctx.content_link, "No router generated a URL");
        None
    }

    /// Drop cached URLs of `content_link` in every market.
    pub fn invalidate(&self, content_link: &ContentRef) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        if let Some(cache) = &self.cache {
            cache.remove(content_link);
        }
    }

    /// Swap the site definition and drop every cached URL built from the old one.
    pub fn replace_site(&self, definition: SiteDefinition) {
        self.site.replace(definition);
        self.epoch.fetch_add(1, Ordering::SeqCst);
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Path of a page, with leading and trailing separator.
    fn base_path(&self, site: &SiteDefinition, root: &ContentRef) -> Option<String> {
        let start = site.start_or_root();
        let mut segments = Vec::new();
        let mut current = *root;

        for _ in 0..MAX_PAGE_DEPTH {
            if current.eq_ignore_work_id(&start) || current.eq_ignore_work_id(&site.root_page) {
                segments.reverse();
                return Some(if segments.is_empty() {
                    SEPARATOR.to_string()
                } else {
                    format!("{SEPARATOR}{}{SEPARATOR}", segments.join("/"))
                });
            }
            let node = self.repository.get(&current)?;
            segments.push(node.route_segment.clone());
            current = node.parent?;
        }
        None
    }
}

fn query_string(ctx: &UrlGeneratorContext) -> String {
    let pairs: Vec<String> = ctx
        .route_values
        .iter()
        .filter(|(key, _)| key.as_str() != CONTENT_LINK_KEY)
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}
