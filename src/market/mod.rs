//! Market subsystem.
//!
//! # Data Flow
//! ```text
//! [markets] config
//!     → service.rs (ConfiguredMarkets: the known market list)
//!     → current.rs (RequestMarketResolver: request market or default)
//!     → consumed by inbound segment stripping, outbound prefixing and
//!       the market-partitioned URL cache
//! ```
//!
//! # Design Decisions
//! - Market ids compare case-insensitively; URLs use the lowercase form
//! - Disabled markets are never stripped from, or generated into, URLs
//! - The default market is validated once at startup

pub mod current;
pub mod service;
pub mod types;

pub use current::{CurrentMarket, RequestMarketResolver};
pub use service::{ConfiguredMarkets, MarketService};
pub use types::{Market, MarketError, MarketId};
