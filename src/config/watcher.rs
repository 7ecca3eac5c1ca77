//! Configuration file watcher for hot reload.
//!
//! Only `[site]` is applied while running. Changes to any other section are
//! logged and ignored until restart; the watcher remembers the configuration
//! it last applied so each section is compared against what is live.

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::{RouterConfig, SiteConfig};

/// What a reloaded configuration changes in the running router.
#[derive(Debug, Default, PartialEq)]
pub struct ReloadOutcome {
    /// New site settings, when `[site]` changed.
    pub site: Option<SiteConfig>,
    /// Changed sections that only take effect after a restart.
    pub restart_required: Vec<&'static str>,
}

/// Compare `next` with the applied configuration and keep the hot-reloadable part.
///
/// `applied.site` is updated when the site changed; every other section of
/// `applied` stays as loaded at startup.
pub fn reconcile_reload(applied: &mut RouterConfig, next: RouterConfig) -> ReloadOutcome {
    let mut restart_required = Vec::new();
    if applied.catalog != next.catalog {
        restart_required.push("catalog");
    }
    if applied.markets != next.markets {
        restart_required.push("markets");
    }
    if applied.localization != next.localization {
        restart_required.push("localization");
    }
    if applied.cache != next.cache {
        restart_required.push("cache");
    }
    if applied.observability != next.observability {
        restart_required.push("observability");
    }
    for section in &restart_required {
        tracing::warn!(section = *section, "Config section changed; restart required to apply it");
    }

    let site = if applied.site != next.site {
        applied.site = next.site.clone();
        Some(next.site)
    } else {
        None
    };

    ReloadOutcome {
        site,
        restart_required,
    }
}

/// A watcher that monitors the configuration file for site changes.
pub struct ConfigWatcher {
    path: PathBuf,
    applied: RouterConfig,
    update_tx: mpsc::UnboundedSender<SiteConfig>,
}

impl ConfigWatcher {
    /// Create a watcher over `path`, starting from the configuration in use.
    ///
    /// Returns the watcher and a receiver for changed site settings.
    pub fn new(path: &Path, applied: RouterConfig) -> (Self, mpsc::UnboundedReceiver<SiteConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                applied,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();
        let mut applied = self.applied;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Config file change detected, reloading...");
                        match load_config(&path) {
                            Ok(next) => {
                                if let Some(site) = reconcile_reload(&mut applied, next).site {
                                    let _ = tx.send(site);
                                }
                            }
                            Err(e) => {
                                tracing::error!(
                                    "Failed to reload config: {}. Keeping current configuration.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}
