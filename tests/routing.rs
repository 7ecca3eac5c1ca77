//! End-to-end routing and URL generation over the sample catalog.

use market_router::catalog::types::{ContentKind, ContentNode, ContentRef};
use market_router::market::types::MarketId;
use market_router::routing::{ContextMode, UrlGeneratorContext, UrlGeneratorOptions};

mod common;

use common::*;

fn market(id: &str) -> Option<MarketId> {
    Some(MarketId::new(id))
}

#[test]
fn test_hierarchical_path_with_market() {
    let service = service(false);
    assert_eq!(
        route(&service, "/us/shoes/running/model-x"),
        Some((MODEL_X, market("US")))
    );
    assert_eq!(
        route(&service, "/EU/Shoes/Running/"),
        Some((RUNNING, market("EU")))
    );
}

#[test]
fn test_path_without_market_segment() {
    let service = service(false);
    assert_eq!(route(&service, "/shoes/running"), Some((RUNNING, None)));
}

#[test]
fn test_market_only_path_is_no_match() {
    let service = service(false);
    assert_eq!(route(&service, "/eu"), None);
    assert_eq!(route(&service, "/eu/"), None);
}

#[test]
fn test_disabled_market_segment_is_not_stripped() {
    let service = service(false);
    assert_eq!(route(&service, "/cn/shoes"), None);
    assert_eq!(url(&service, SHOES, Some("CN")).as_deref(), Some("/us/shoes"));
}

#[test]
fn test_empty_path_routes_to_start_page() {
    let service = service(false);
    assert_eq!(route(&service, ""), Some((START_PAGE, None)));
}

#[test]
fn test_non_leaf_round_trip() {
    let service = service(false);
    for (id, expected) in [
        (SHOES, "/eu/shoes"),
        (RUNNING, "/eu/shoes/running"),
        (MODEL_X_42, "/eu/shoes/running/model-x/42"),
        (APPAREL, "/eu/apparel"),
    ] {
        let generated = url(&service, id, Some("EU")).unwrap();
        assert_eq!(generated, expected);
        assert_eq!(route(&service, &generated), Some((id, market("EU"))));
    }
}

#[test]
fn test_leaf_uses_seo_path_behind_market() {
    let service = service(false);
    let generated = url(&service, MODEL_X, Some("SE")).unwrap();
    assert_eq!(generated, "/se/model-x-running-shoe");
    assert_eq!(route(&service, &generated), Some((MODEL_X, market("SE"))));
}

#[test]
fn test_leaf_without_seo_path_uses_structure() {
    let service = service(false);
    let generated = url(&service, RAIN_JACKET, None).unwrap();
    assert_eq!(generated, "/us/apparel/rain-jacket");
    assert_eq!(route(&service, &generated), Some((RAIN_JACKET, market("US"))));
}

#[test]
fn test_seo_outgoing_leaf_has_no_market_prefix() {
    let service = service(true);
    let generated = url(&service, NIKE_AIR, Some("EU")).unwrap();
    assert_eq!(generated, "/nike-air-42");
    assert_eq!(route(&service, &generated), Some((NIKE_AIR, None)));
    assert_eq!(route(&service, "/eu/nike-air-42"), Some((NIKE_AIR, market("EU"))));
}

#[test]
fn test_seo_outgoing_non_leaf_hit_is_walked() {
    let service = service(true);
    assert_eq!(url(&service, APPAREL, None).as_deref(), Some("/apparel-collection"));
    assert_eq!(route(&service, "/apparel-collection"), None);
    assert_eq!(route(&service, "/us/apparel"), Some((APPAREL, market("US"))));
}

#[test]
fn test_seo_outgoing_skipped_in_edit_mode() {
    let service = service(true);
    let ctx = UrlGeneratorContext::new(request(Some("EU")), ContentRef::with_work_id(NIKE_AIR, 7))
        .with_mode(ContextMode::Edit);
    assert_eq!(
        service
            .resolver()
            .get_url(ctx, UrlGeneratorOptions::default())
            .as_deref(),
        Some("/eu/nike-air-42,,31_7")
    );
}

#[test]
fn test_localized_segments() {
    let service = service(false);
    let generated = url_in(&service, RUNNING, Some("SE"), Some("sv")).unwrap();
    assert_eq!(generated, "/se/skor/lopning");
    assert_eq!(
        route_in(&service, &generated, Some("sv")),
        Some((RUNNING, market("SE")))
    );
    assert_eq!(route_in(&service, "/se/shoes/running", Some("sv")), None);
}

#[test]
fn test_non_catalog_content_has_no_url() {
    let service = service(false);
    assert_eq!(url(&service, 6, None), None);
    assert_eq!(url(&service, 404, None), None);
}

#[test]
fn test_absolute_urls() {
    let service = service(false);
    let ctx = UrlGeneratorContext::new(request(Some("EU")), ContentRef::new(SHOES));
    let generated = service
        .resolver()
        .get_url(ctx, UrlGeneratorOptions { force_absolute: true });
    assert_eq!(generated.as_deref(), Some("https://shop.example.com/eu/shoes"));
}

#[test]
fn test_cache_is_partitioned_by_market() {
    let service = service(false);
    assert_eq!(url(&service, SHOES, Some("US")).as_deref(), Some("/us/shoes"));
    assert_eq!(url(&service, SHOES, Some("EU")).as_deref(), Some("/eu/shoes"));
    assert_eq!(url(&service, SHOES, Some("US")).as_deref(), Some("/us/shoes"));
    assert_eq!(url(&service, SHOES, None).as_deref(), Some("/us/shoes"));
}

#[test]
fn test_content_update_invalidates_every_market() {
    let service = service(false);
    assert_eq!(url(&service, RUNNING, Some("US")).as_deref(), Some("/us/shoes/running"));
    assert_eq!(url(&service, RUNNING, Some("EU")).as_deref(), Some("/eu/shoes/running"));

    service
        .update_content(
            ContentNode::new(RUNNING, Some(SHOES.into()), ContentKind::Category, "Running", "jogging"),
        )
        .unwrap();

    assert_eq!(url(&service, RUNNING, Some("US")).as_deref(), Some("/us/shoes/jogging"));
    assert_eq!(url(&service, RUNNING, Some("EU")).as_deref(), Some("/eu/shoes/jogging"));
    assert_eq!(route(&service, "/eu/shoes/jogging"), Some((RUNNING, market("EU"))));
}
