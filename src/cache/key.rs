//! URL cache keys.

use std::collections::BTreeMap;

use crate::catalog::types::{ContentRef, Locale};
use crate::market::types::MarketId;
use crate::routing::context::{ContextMode, UrlGeneratorContext, UrlGeneratorOptions};

/// The parts of a generation request that determine the URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlCacheContext {
    pub content_link: ContentRef,
    pub language: Option<Locale>,
    pub mode: ContextMode,
    /// Route values end up in the query string.
    pub route_values: BTreeMap<String, String>,
    pub options: UrlGeneratorOptions,
}

impl UrlCacheContext {
    pub fn new(ctx: &UrlGeneratorContext, options: UrlGeneratorOptions) -> Self {
        Self {
            content_link: ctx.content_link,
            language: ctx.language.clone(),
            mode: ctx.mode,
            route_values: ctx.route_values.clone(),
            options,
        }
    }
}

/// Cache key: the generation context plus the market it was generated for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlCacheKey {
    context: UrlCacheContext,
    market: Option<MarketId>,
}

impl UrlCacheKey {
    /// A key not yet bound to a market.
    pub fn new(context: UrlCacheContext) -> Self {
        Self { context, market: None }
    }

    pub fn with_market(mut self, market: MarketId) -> Self {
        self.market = Some(market);
        self
    }

    pub fn context(&self) -> &UrlCacheContext {
        &self.context
    }

    pub fn market(&self) -> Option<&MarketId> {
        self.market.as_ref()
    }

    pub fn content_link(&self) -> &ContentRef {
        &self.context.content_link
    }
}

/// A cached URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUrl {
    pub url: String,
    pub content_link: ContentRef,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::context::RequestContext;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(key: &UrlCacheKey) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    fn context() -> UrlCacheContext {
        let ctx = UrlGeneratorContext::new(RequestContext::new(), ContentRef::new(30))
            .with_language(Some(Locale::new("en")));
        UrlCacheContext::new(&ctx, UrlGeneratorOptions::default())
    }

    #[test]
    fn test_market_is_part_of_identity() {
        let us = UrlCacheKey::new(context()).with_market(MarketId::new("US"));
        let eu = UrlCacheKey::new(context()).with_market(MarketId::new("EU"));
        assert_ne!(us, eu);
        assert_ne!(hash_of(&us), hash_of(&eu));
        assert_ne!(us, UrlCacheKey::new(context()));
    }

    #[test]
    fn test_same_context_and_market_are_equal() {
        let a = UrlCacheKey::new(context()).with_market(MarketId::new("US"));
        let b = UrlCacheKey::new(context()).with_market(MarketId::new("us"));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_context_differences_are_kept() {
        let base = UrlCacheKey::new(context()).with_market(MarketId::new("US"));
        let mut edit = context();
        edit.mode = ContextMode::Edit;
        assert_ne!(base, UrlCacheKey::new(edit).with_market(MarketId::new("US")));

        let mut absolute = context();
        absolute.options.force_absolute = true;
        assert_ne!(base, UrlCacheKey::new(absolute).with_market(MarketId::new("US")));

        let mut paged = context();
        paged.route_values.insert("page".into(), "2".into());
        assert_ne!(base, UrlCacheKey::new(paged).with_market(MarketId::new("US")));
    }
}
