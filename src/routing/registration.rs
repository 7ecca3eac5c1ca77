//! Startup registration of the catalog router.

use std::sync::Arc;
use thiserror::Error;

use crate::catalog::path::StructuralPathBuilder;
use crate::catalog::repository::{ContentRepository, SeoUriResolver};
use crate::catalog::types::{ContentKind, ContentNode, ContentRef};
use crate::config::schema::CatalogConfig;
use crate::market::current::CurrentMarket;
use crate::market::service::MarketService;
use crate::routing::context::ContentLanguageAccessor;
use crate::routing::hierarchical::{HierarchicalCatalogRouter, RouteStartingPoint};
use crate::routing::market_router::MarketCatalogRouter;
use crate::routing::router::RouteTable;
use crate::routing::site::SiteDefinitionStore;

/// Errors that stop route registration.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Catalog root {0} does not exist")]
    MissingCatalogRoot(ContentRef),

    #[error("The '{0}' catalog needs to be created first")]
    MissingCommerceRoot(String),
}

/// Collaborators the catalog router is built from.
#[derive(Clone)]
pub struct RouteDependencies {
    pub repository: Arc<dyn ContentRepository>,
    pub seo_resolver: Arc<dyn SeoUriResolver>,
    pub markets: Arc<dyn MarketService>,
    pub current_market: Arc<dyn CurrentMarket>,
    pub language: Arc<dyn ContentLanguageAccessor>,
    pub site: Arc<SiteDefinitionStore>,
}

/// Starting point that follows the current site: start page, else root page.
pub fn site_starting_point(site: Arc<SiteDefinitionStore>) -> RouteStartingPoint {
    Arc::new(move || site.current().start_or_root())
}

/// Find the catalog below `catalog_root` named `name` (case-insensitive).
pub fn find_commerce_root(
    repository: &dyn ContentRepository,
    catalog_root: ContentRef,
    name: &str,
) -> Result<Arc<ContentNode>, RegistrationError> {
    if repository.get(&catalog_root).is_none() {
        return Err(RegistrationError::MissingCatalogRoot(catalog_root));
    }
    repository
        .children(&catalog_root)
        .into_iter()
        .find(|node| node.kind == ContentKind::Catalog && node.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| RegistrationError::MissingCommerceRoot(name.to_string()))
}

/// Register the market catalog router. Calling it again replaces the
/// previous registration.
pub fn register_routes(
    table: &mut RouteTable,
    config: &CatalogConfig,
    deps: &RouteDependencies,
) -> Result<(), RegistrationError> {
    let commerce_root = find_commerce_root(
        deps.repository.as_ref(),
        ContentRef::new(config.root_link),
        &config.default_catalog_name,
    )
    .inspect_err(|e| tracing::error!(error = %e, "Catalog route registration failed"))?;

    let path_builder = Arc::new(StructuralPathBuilder::new(
        deps.repository.clone(),
        commerce_root.link,
    ));
    let inner = HierarchicalCatalogRouter::new(
        site_starting_point(deps.site.clone()),
        commerce_root.link,
        deps.repository.clone(),
        deps.seo_resolver.clone(),
        path_builder,
    );
    let router = MarketCatalogRouter::new(
        inner,
        config.enable_outgoing_seo_uri,
        deps.markets.clone(),
        deps.current_market.clone(),
        deps.language.clone(),
        deps.site.clone(),
    );

    table.register(Arc::new(router));
    tracing::info!(
        commerce_root = %commerce_root.link,
        catalog = %commerce_root.name,
        enable_outgoing_seo_uri = config.enable_outgoing_seo_uri,
        "Catalog routes registered"
    );
    Ok(())
}
