//! OS signal handling.
//!
//! # Responsibilities
//! - Translate Ctrl-C into the internal shutdown signal
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Returns early if shutdown was triggered from elsewhere

use crate::lifecycle::shutdown::Shutdown;

/// Wait for Ctrl-C, then trigger `shutdown`.
pub async fn shutdown_on_ctrl_c(shutdown: Shutdown) {
    let mut rx = shutdown.subscribe();
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => tracing::info!("Ctrl-C received, shutting down"),
                Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl-C, shutting down"),
            }
            shutdown.trigger();
        }
        _ = rx.recv() => {}
    }
}
