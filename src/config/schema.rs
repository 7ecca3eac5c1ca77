//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Start and root pages.
    pub site: SiteConfig,

    /// Catalog routing settings.
    pub catalog: CatalogConfig,

    /// Market definitions.
    pub markets: MarketsConfig,

    /// Language fallback.
    pub localization: LocalizationConfig,

    /// Generated URL cache.
    pub cache: UrlCacheConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Site pages.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Start page content id (0 = no start page).
    pub start_page: u64,

    /// Root page content id.
    pub root_page: u64,

    /// Scheme and host for absolute URLs (e.g., "https://shop.example.com").
    pub site_url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            start_page: 0,
            root_page: 1,
            site_url: None,
        }
    }
}

/// Catalog routing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Content id of the catalog root (parent of all catalogs).
    pub root_link: u64,

    /// Name of the catalog routes are served from.
    pub default_catalog_name: String,

    /// Prefer flat SEO paths for outgoing links.
    pub enable_outgoing_seo_uri: bool,

    /// JSON catalog fixture to load at startup.
    pub fixture_path: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root_link: 2,
            default_catalog_name: "Catalog".to_string(),
            enable_outgoing_seo_uri: false,
            fixture_path: None,
        }
    }
}

/// Market list and default.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MarketsConfig {
    /// Market used when a request has none.
    pub default_market: String,

    pub markets: Vec<MarketConfig>,
}

impl Default for MarketsConfig {
    fn default() -> Self {
        Self {
            default_market: "DEFAULT".to_string(),
            markets: vec![MarketConfig {
                id: "DEFAULT".to_string(),
                name: "Default Market".to_string(),
                enabled: true,
            }],
        }
    }
}

/// A single market.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MarketConfig {
    /// Market identifier, also its URL segment (lowercased).
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Disabled markets are not routable.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Localization configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Content language used when a request does not specify one.
    pub default_language: String,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
        }
    }
}

/// URL cache configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UrlCacheConfig {
    /// Enable caching of generated URLs.
    pub enabled: bool,

    /// Maximum cached URLs across all markets.
    pub max_entries: usize,
}

impl Default for UrlCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 10_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert_eq!(config.site.root_page, 1);
        assert_eq!(config.catalog.default_catalog_name, "Catalog");
        assert!(!config.catalog.enable_outgoing_seo_uri);
        assert_eq!(config.markets.default_market, "DEFAULT");
        assert_eq!(config.cache.max_entries, 10_000);
    }

    #[test]
    fn test_market_defaults() {
        let config: RouterConfig = toml::from_str(
            r#"
            [markets]
            default_market = "US"

            [[markets.markets]]
            id = "US"

            [[markets.markets]]
            id = "CN"
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.markets.markets.len(), 2);
        assert!(config.markets.markets[0].enabled);
        assert!(!config.markets.markets[1].enabled);
    }
}
