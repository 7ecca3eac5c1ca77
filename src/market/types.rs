//! Market identity and definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Market identifier. Equality and hashing ignore ASCII case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketId(String);

impl MarketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as configured.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form used as a URL segment.
    pub fn to_url_segment(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Case-insensitive comparison against a raw URL segment.
    pub fn matches_segment(&self, segment: &str) -> bool {
        self.0.eq_ignore_ascii_case(segment)
    }
}

impl PartialEq for MarketId {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for MarketId {}

impl Hash for MarketId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl From<&str> for MarketId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A configured market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    pub id: MarketId,
    pub name: String,
    pub enabled: bool,
}

impl Market {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: MarketId::new(id),
            name: name.into(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Market configuration errors.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("Default market '{0}' is not configured")]
    UnknownDefaultMarket(String),

    #[error("Default market '{0}' is disabled")]
    DisabledDefaultMarket(String),
}
