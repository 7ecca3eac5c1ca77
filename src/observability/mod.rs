//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing, generation and caching produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and gauges via the metrics facade)
//!     → tracing.rs (per-request spans carrying the request id)
//! ```
//!
//! # Design Decisions
//! - Structured fields (content_id, market, locale) instead of formatted text
//! - Metrics are recorded through the facade only; without an installed
//!   recorder they are no-ops
//! - Log level comes from config unless RUST_LOG is set

pub mod logging;
pub mod metrics;
pub mod tracing;
