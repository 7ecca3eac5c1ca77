//! Site definition with atomic replacement on config reload.

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::catalog::types::ContentRef;
use crate::config::schema::SiteConfig;

/// Start and root pages of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDefinition {
    /// Empty when the site has no start page.
    pub start_page: ContentRef,
    pub root_page: ContentRef,
    /// Scheme and host used for absolute URLs.
    pub site_url: Option<String>,
}

impl SiteDefinition {
    /// The start page, or the root page when no start page is set.
    pub fn start_or_root(&self) -> ContentRef {
        if self.start_page.is_empty() {
            self.root_page
        } else {
            self.start_page
        }
    }
}

impl From<&SiteConfig> for SiteDefinition {
    fn from(config: &SiteConfig) -> Self {
        Self {
            start_page: ContentRef::new(config.start_page),
            root_page: ContentRef::new(config.root_page),
            site_url: config.site_url.clone(),
        }
    }
}

/// Holds the current site definition.
///
/// Readers always see a complete definition; `replace` swaps it atomically.
#[derive(Debug)]
pub struct SiteDefinitionStore {
    current: ArcSwap<SiteDefinition>,
}

impl SiteDefinitionStore {
    pub fn new(definition: SiteDefinition) -> Self {
        Self {
            current: ArcSwap::from_pointee(definition),
        }
    }

    pub fn current(&self) -> Arc<SiteDefinition> {
        self.current.load_full()
    }

    pub fn replace(&self, definition: SiteDefinition) {
        tracing::info!(
            start_page = %definition.start_page,
            root_page = %definition.root_page,
            "Site definition replaced"
        );
        self.current.store(Arc::new(definition));
    }
}
