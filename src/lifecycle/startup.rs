//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the catalog named by configuration
//! - Build markets, current-market resolution and the language fallback
//! - Register catalog routes and wire the market-partitioned URL cache
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Routes are registered last (only once every collaborator exists)

use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::cache::market::MarketContentUrlCache;
use crate::cache::memory::InMemoryUrlCache;
use crate::cache::ContentUrlCache;
use crate::catalog::memory::{CatalogError, InMemoryCatalog};
use crate::catalog::types::{ContentNode, Locale};
use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::{RouterConfig, SiteConfig};
use crate::market::current::{CurrentMarket, RequestMarketResolver};
use crate::market::service::{ConfiguredMarkets, MarketService};
use crate::market::types::{MarketError, MarketId};
use crate::routing::context::FixedContentLanguage;
use crate::routing::registration::{register_routes, RegistrationError, RouteDependencies};
use crate::routing::router::RouteTable;
use crate::routing::site::{SiteDefinition, SiteDefinitionStore};
use crate::routing::url_resolver::UrlResolver;

/// Errors that prevent the router from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Market error: {0}")]
    Market(#[from] MarketError),

    #[error("Route registration failed: {0}")]
    Registration(#[from] RegistrationError),

    #[error("catalog.fixture_path is not configured")]
    MissingFixture,
}

/// A fully wired router.
pub struct RoutingService {
    catalog: Arc<InMemoryCatalog>,
    site: Arc<SiteDefinitionStore>,
    current_market: Arc<RequestMarketResolver>,
    resolver: UrlResolver,
}

impl RoutingService {
    pub fn resolver(&self) -> &UrlResolver {
        &self.resolver
    }

    pub fn catalog(&self) -> &Arc<InMemoryCatalog> {
        &self.catalog
    }

    pub fn site(&self) -> &Arc<SiteDefinitionStore> {
        &self.site
    }

    pub fn default_market(&self) -> &MarketId {
        self.current_market.default_market()
    }

    /// Apply reloaded site settings. Cached URLs built from the old site are dropped.
    pub fn apply_site(&self, site: &SiteConfig) {
        tracing::info!(start_page = site.start_page, site_url = ?site.site_url, "Site definition reloaded");
        self.resolver.replace_site(SiteDefinition::from(site));
    }

    /// Store a changed node and drop its cached URLs in every market.
    pub fn update_content(&self, node: ContentNode) -> Result<(), CatalogError> {
        let link = node.link;
        self.catalog.upsert(node)?;
        self.resolver.invalidate(&link);
        Ok(())
    }
}

/// Load configuration from `path` and start the router.
pub fn bootstrap_from_file(path: &Path) -> Result<RoutingService, StartupError> {
    let config = load_config(path)?;
    tracing::info!(path = ?path, "Configuration loaded");
    bootstrap(&config)
}

/// Start the router over the catalog fixture named by `config`.
pub fn bootstrap(config: &RouterConfig) -> Result<RoutingService, StartupError> {
    let fixture = config
        .catalog
        .fixture_path
        .as_deref()
        .ok_or(StartupError::MissingFixture)?;
    let catalog = Arc::new(InMemoryCatalog::load_from_file(Path::new(fixture))?);
    bootstrap_with_catalog(config, catalog)
}

/// Start the router over an already loaded catalog.
pub fn bootstrap_with_catalog(
    config: &RouterConfig,
    catalog: Arc<InMemoryCatalog>,
) -> Result<RoutingService, StartupError> {
    let markets: Arc<dyn MarketService> = Arc::new(ConfiguredMarkets::from_config(&config.markets));
    let current_market = Arc::new(RequestMarketResolver::new(
        markets.clone(),
        MarketId::new(config.markets.default_market.clone()),
    )?);
    tracing::info!(
        markets = config.markets.markets.len(),
        default_market = %current_market.default_market(),
        "Markets initialized"
    );

    let site = Arc::new(SiteDefinitionStore::new(SiteDefinition::from(&config.site)));
    let deps = RouteDependencies {
        repository: catalog.clone(),
        seo_resolver: catalog.clone(),
        markets,
        current_market: current_market.clone(),
        language: Arc::new(FixedContentLanguage(Locale::new(
            &config.localization.default_language,
        ))),
        site: site.clone(),
    };

    let mut routes = RouteTable::new();
    register_routes(&mut routes, &config.catalog, &deps)?;

    let cache: Option<Arc<dyn ContentUrlCache>> = if config.cache.enabled {
        let current: Arc<dyn CurrentMarket> = current_market.clone();
        Some(Arc::new(MarketContentUrlCache::new(
            Arc::new(InMemoryUrlCache::new(config.cache.max_entries)),
            current,
        )))
    } else {
        None
    };
    tracing::info!(
        enabled = config.cache.enabled,
        max_entries = config.cache.max_entries,
        "URL cache configured"
    );

    let resolver = UrlResolver::new(routes, catalog.clone(), site.clone(), cache);
    tracing::info!(routers = ?resolver.routes(), "Router started");

    Ok(RoutingService {
        catalog,
        site,
        current_market,
        resolver,
    })
}
