//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path ("/eu/shoes/running")
//!     → url_resolver.rs (start page, try partial routers in order)
//!     → market_router.rs (strip market segment, pick locale)
//!     → hierarchical.rs (flat SEO lookup, then tree walk)
//!     → Return: matched content + market, or None
//!
//! URL generation:
//!     UrlGeneratorContext (content link, language, mode)
//!     → cache lookup (market-partitioned)
//!     → market_router.rs ("{market}/{path}" or flat SEO path)
//!     → base page path + partial path
//!     → cache fill
//!
//! Registration (at startup):
//!     CatalogConfig
//!     → registration.rs (find commerce root by catalog name)
//!     → RouteTable (one router per name)
//! ```
//!
//! # Design Decisions
//! - Routers are registered at startup and immutable afterwards
//! - A miss is `None`, never an error
//! - Path state is an immutable cursor; consuming a segment yields a new one
//! - First match wins (registration order)

pub mod context;
pub mod hierarchical;
pub mod market_router;
pub mod registration;
pub mod router;
pub mod segment;
pub mod site;
pub mod url_resolver;

pub use context::{
    ContentLanguageAccessor, ContextMode, FixedContentLanguage, PartialRouteData, RequestContext,
    UrlGeneratorContext, UrlGeneratorOptions, UrlResolverContext,
};
pub use hierarchical::HierarchicalCatalogRouter;
pub use market_router::MarketCatalogRouter;
pub use registration::{register_routes, RegistrationError, RouteDependencies};
pub use router::{PartialRouter, RouteTable};
pub use site::{SiteDefinition, SiteDefinitionStore};
pub use url_resolver::{ResolvedRoute, UrlResolver};
