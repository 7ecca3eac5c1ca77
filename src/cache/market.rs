//! Market-partitioned URL cache decorator.

use std::sync::Arc;

use crate::cache::key::{GeneratedUrl, UrlCacheKey};
use crate::cache::ContentUrlCache;
use crate::catalog::types::ContentRef;
use crate::market::current::CurrentMarket;
use crate::routing::context::RequestContext;

/// Binds every read and write to the request's current market.
///
/// Removal passes straight through, so a content change invalidates the
/// URL in all markets at once.
pub struct MarketContentUrlCache {
    inner: Arc<dyn ContentUrlCache>,
    current_market: Arc<dyn CurrentMarket>,
}

impl MarketContentUrlCache {
    pub fn new(inner: Arc<dyn ContentUrlCache>, current_market: Arc<dyn CurrentMarket>) -> Self {
        Self {
            inner,
            current_market,
        }
    }

    fn market_key(&self, request: &RequestContext, key: &UrlCacheKey) -> UrlCacheKey {
        key.clone()
            .with_market(self.current_market.current_market(request))
    }
}

impl ContentUrlCache for MarketContentUrlCache {
    fn get(&self, request: &RequestContext, key: &UrlCacheKey) -> Option<GeneratedUrl> {
        self.inner.get(request, &self.market_key(request, key))
    }

    fn insert(&self, request: &RequestContext, url: GeneratedUrl, key: UrlCacheKey) {
        let key = self.market_key(request, &key);
        self.inner.insert(request, url, key);
    }

    fn remove(&self, content_link: &ContentRef) {
        self.inner.remove(content_link);
    }

    fn clear(&self) {
        self.inner.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::key::UrlCacheContext;
    use crate::cache::memory::InMemoryUrlCache;
    use crate::market::service::{ConfiguredMarkets, MarketService};
    use crate::market::current::RequestMarketResolver;
    use crate::market::types::{Market, MarketId};
    use crate::routing::context::{UrlGeneratorContext, UrlGeneratorOptions};

    fn cache() -> (Arc<InMemoryUrlCache>, MarketContentUrlCache) {
        let markets: Arc<dyn MarketService> = Arc::new(ConfiguredMarkets::new(vec![
            Market::new("US", "United States"),
            Market::new("EU", "Europe"),
        ]));
        let resolver = Arc::new(RequestMarketResolver::new(markets, MarketId::new("US")).unwrap());
        let inner = Arc::new(InMemoryUrlCache::new(100));
        (inner.clone(), MarketContentUrlCache::new(inner, resolver))
    }

    fn key(id: u64) -> UrlCacheKey {
        let ctx = UrlGeneratorContext::new(RequestContext::new(), ContentRef::new(id));
        UrlCacheKey::new(UrlCacheContext::new(&ctx, UrlGeneratorOptions::default()))
    }

    fn url(path: &str, id: u64) -> GeneratedUrl {
        GeneratedUrl {
            url: path.to_string(),
            content_link: ContentRef::new(id),
        }
    }

    #[test]
    fn test_markets_do_not_share_entries() {
        let (_, cache) = cache();
        let us = RequestContext::new().with_market(MarketId::new("US"));
        let eu = RequestContext::new().with_market(MarketId::new("EU"));

        cache.insert(&us, url("/us/shoes", 20), key(20));
        assert_eq!(cache.get(&us, &key(20)), Some(url("/us/shoes", 20)));
        assert_eq!(cache.get(&eu, &key(20)), None);

        cache.insert(&eu, url("/eu/shoes", 20), key(20));
        assert_eq!(cache.get(&us, &key(20)), Some(url("/us/shoes", 20)));
        assert_eq!(cache.get(&eu, &key(20)), Some(url("/eu/shoes", 20)));
    }

    #[test]
    fn test_request_without_market_uses_default() {
        let (_, cache) = cache();
        cache.insert(&RequestContext::new(), url("/us/shoes", 20), key(20));
        let us = RequestContext::new().with_market(MarketId::new("us"));
        assert_eq!(cache.get(&us, &key(20)), Some(url("/us/shoes", 20)));
    }

    #[test]
    fn test_remove_invalidates_all_markets() {
        let (inner, cache) = cache();
        let us = RequestContext::new().with_market(MarketId::new("US"));
        let eu = RequestContext::new().with_market(MarketId::new("EU"));
        cache.insert(&us, url("/us/shoes", 20), key(20));
        cache.insert(&eu, url("/eu/shoes", 20), key(20));
        cache.insert(&eu, url("/eu/bags", 21), key(21));
        assert_eq!(inner.len(), 3);

        cache.remove(&ContentRef::with_work_id(20, 4));
        assert_eq!(cache.get(&us, &key(20)), None);
        assert_eq!(cache.get(&eu, &key(20)), None);
        assert_eq!(cache.get(&eu, &key(21)), Some(url("/eu/bags", 21)));

        cache.clear();
        assert!(inner.is_empty());
    }

    #[test]
    fn test_inner_entries_carry_market() {
        let (inner, cache) = cache();
        let eu = RequestContext::new().with_market(MarketId::new("EU"));
        cache.insert(&eu, url("/eu/shoes", 20), key(20));
        assert_eq!(inner.get(&eu, &key(20)), None);
        assert!(inner
            .get(&eu, &key(20).with_market(MarketId::new("eu")))
            .is_some());
    }
}
