//! Market-aware catalog URL routing.
//!
//! Maps paths such as `/us/shoes/running/model-x` to catalog content and
//! generates market-prefixed URLs for catalog content, with a URL cache
//! partitioned by market.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod lifecycle;
pub mod market;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use lifecycle::{RoutingService, Shutdown};
pub use routing::UrlResolver;
