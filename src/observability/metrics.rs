//! Routing metrics.
//!
//! # Metrics
//! - `router_inbound_total` (counter): inbound matches by outcome
//!   (`flat`, `hierarchical`, `miss`)
//! - `router_outbound_total` (counter): generated paths by kind
//!   (`seo`, `market`, `miss`)
//! - `url_cache_lookups_total` (counter): cache lookups by result (`hit`, `miss`)
//! - `url_cache_invalidations_total` (counter): content invalidations
//! - `url_cache_entries` (gauge): cached URL count

pub fn record_inbound(outcome: &'static str) {
    metrics::counter!("router_inbound_total", "outcome" => outcome).increment(1);
}

pub fn record_outbound(kind: &'static str) {
    metrics::counter!("router_outbound_total", "kind" => kind).increment(1);
}

pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    metrics::counter!("url_cache_lookups_total", "result" => result).increment(1);
}

pub fn record_cache_invalidation() {
    metrics::counter!("url_cache_invalidations_total").increment(1);
}

pub fn record_cache_size(size: usize) {
    metrics::gauge!("url_cache_entries").set(size as f64);
}
