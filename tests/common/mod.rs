//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use market_router::catalog::types::{ContentRef, Locale};
use market_router::config::{load_config, RouterConfig};
use market_router::lifecycle::{bootstrap, RoutingService};
use market_router::market::types::MarketId;
use market_router::routing::{RequestContext, UrlGeneratorContext, UrlGeneratorOptions};

pub const START_PAGE: u64 = 5;
pub const SHOES: u64 = 20;
pub const RUNNING: u64 = 21;
pub const APPAREL: u64 = 22;
pub const MODEL_X: u64 = 30;
pub const NIKE_AIR: u64 = 31;
pub const RAIN_JACKET: u64 = 32;
pub const MODEL_X_42: u64 = 40;

pub fn manifest_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

/// The sample config with the fixture path made absolute.
pub fn config(enable_outgoing_seo_uri: bool) -> RouterConfig {
    let mut config = load_config(&manifest_path("router.toml")).unwrap();
    config.catalog.fixture_path = Some(
        manifest_path("fixtures/catalog.json")
            .to_string_lossy()
            .into_owned(),
    );
    config.catalog.enable_outgoing_seo_uri = enable_outgoing_seo_uri;
    config
}

pub fn service(enable_outgoing_seo_uri: bool) -> RoutingService {
    bootstrap(&config(enable_outgoing_seo_uri)).unwrap()
}

pub fn request(market: Option<&str>) -> RequestContext {
    match market {
        Some(market) => RequestContext::new().with_market(MarketId::new(market)),
        None => RequestContext::new(),
    }
}

pub fn url(service: &RoutingService, id: u64, market: Option<&str>) -> Option<String> {
    url_in(service, id, market, None)
}

pub fn url_in(
    service: &RoutingService,
    id: u64,
    market: Option<&str>,
    language: Option<&str>,
) -> Option<String> {
    let ctx = UrlGeneratorContext::new(request(market), ContentRef::new(id))
        .with_language(language.map(Locale::new));
    service
        .resolver()
        .get_url(ctx, UrlGeneratorOptions::default())
}

/// Route `path` and return the matched content id and market.
pub fn route(service: &RoutingService, path: &str) -> Option<(u64, Option<MarketId>)> {
    route_in(service, path, None)
}

pub fn route_in(
    service: &RoutingService,
    path: &str,
    language: Option<&str>,
) -> Option<(u64, Option<MarketId>)> {
    service
        .resolver()
        .route(RequestContext::new(), path, language.map(Locale::new))
        .map(|r| (r.content.link.id, r.market))
}
