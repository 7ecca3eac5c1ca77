//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Load catalog → Markets → Register routes → Cache
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Broadcast → Background loops exit
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl-C) → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then catalog, then routes
//! - Fail fast: any startup error is fatal
//! - Config reload swaps the site definition only

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{bootstrap, bootstrap_from_file, bootstrap_with_catalog, RoutingService, StartupError};
