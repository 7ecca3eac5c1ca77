//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the default market is configured and enabled
//! - Detect duplicate market ids (case-insensitive)
//! - Validate value ranges (cache bound, page ids)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::RouterConfig;

/// A single semantic configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("site.root_page must be a content id greater than 0")]
    MissingRootPage,

    #[error("catalog.default_catalog_name must not be empty")]
    EmptyCatalogName,

    #[error("market id must not be empty or contain '/'")]
    InvalidMarketId(String),

    #[error("market '{0}' is configured more than once")]
    DuplicateMarket(String),

    #[error("default market '{0}' is not configured")]
    UnknownDefaultMarket(String),

    #[error("default market '{0}' is disabled")]
    DisabledDefaultMarket(String),

    #[error("localization.default_language must not be empty")]
    EmptyDefaultLanguage,

    #[error("cache.max_entries must be greater than 0")]
    ZeroCacheSize,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.site.root_page == 0 {
        errors.push(ValidationError::MissingRootPage);
    }
    if config.catalog.default_catalog_name.trim().is_empty() {
        errors.push(ValidationError::EmptyCatalogName);
    }

    let mut seen = HashSet::new();
    for market in &config.markets.markets {
        let id = market.id.trim();
        if id.is_empty() || id.contains('/') {
            errors.push(ValidationError::InvalidMarketId(market.id.clone()));
        } else if !seen.insert(id.to_ascii_lowercase()) {
            errors.push(ValidationError::DuplicateMarket(market.id.clone()));
        }
    }

    let default_market = &config.markets.default_market;
    match config
        .markets
        .markets
        .iter()
        .find(|m| m.id.eq_ignore_ascii_case(default_market))
    {
        None => errors.push(ValidationError::UnknownDefaultMarket(default_market.clone())),
        Some(m) if !m.enabled => {
            errors.push(ValidationError::DisabledDefaultMarket(default_market.clone()))
        }
        Some(_) => {}
    }

    if config.localization.default_language.trim().is_empty() {
        errors.push(ValidationError::EmptyDefaultLanguage);
    }
    if config.cache.max_entries == 0 {
        errors.push(ValidationError::ZeroCacheSize);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
