//! Generated URL caching.
//!
//! # Data Flow
//! ```text
//! UrlResolver::get_url
//!     → key.rs (UrlCacheKey: generation context + options + market)
//!     → market.rs (MarketContentUrlCache: stamp current market on the key)
//!     → memory.rs (InMemoryUrlCache: bounded, sharded map)
//!
//! Content change:
//!     UrlResolver::invalidate(link)
//!     → remove every entry for the content, in every market
//!
//! Site change:
//!     UrlResolver::replace_site(definition)
//!     → clear every entry (base paths and site URL are baked in)
//! ```
//!
//! # Design Decisions
//! - The market is part of key equality and hashing
//! - Removal is by content identity and ignores markets on purpose
//! - The in-memory cache evicts oldest entries first once full

pub mod key;
pub mod market;
pub mod memory;

pub use key::{GeneratedUrl, UrlCacheContext, UrlCacheKey};
pub use market::MarketContentUrlCache;
pub use memory::InMemoryUrlCache;

use crate::catalog::types::ContentRef;
use crate::routing::context::RequestContext;

/// Cache of generated URLs.
pub trait ContentUrlCache: Send + Sync {
    fn get(&self, request: &RequestContext, key: &UrlCacheKey) -> Option<GeneratedUrl>;

    fn insert(&self, request: &RequestContext, url: GeneratedUrl, key: UrlCacheKey);

    /// Drop every cached URL for `content_link`.
    fn remove(&self, content_link: &ContentRef);

    /// Drop every cached URL.
    fn clear(&self);
}
