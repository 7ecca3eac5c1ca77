//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! router.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → lifecycle::startup wires routers, markets and cache from it
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → compared with the last applied config
//!     → changed restart-only sections logged and ignored
//!     → changed [site] sent over channel
//!     → site definition swapped atomically, URL cache cleared
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Only the site definition is hot-swappable; route registration is startup-only

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    CatalogConfig, LocalizationConfig, MarketConfig, MarketsConfig, ObservabilityConfig,
    RouterConfig, SiteConfig, UrlCacheConfig,
};
pub use validation::ValidationError;
pub use watcher::{reconcile_reload, ConfigWatcher, ReloadOutcome};
