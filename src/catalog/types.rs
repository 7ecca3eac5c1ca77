//! Content identity, locale and catalog node definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Reference to a content item, optionally pinned to a draft version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContentRef {
    /// Content identity.
    pub id: u64,
    /// Draft version, 0 for the published version.
    #[serde(default)]
    pub work_id: u32,
}

impl ContentRef {
    /// The empty reference (no content).
    pub const EMPTY: ContentRef = ContentRef { id: 0, work_id: 0 };

    pub const fn new(id: u64) -> Self {
        Self { id, work_id: 0 }
    }

    pub const fn with_work_id(id: u64, work_id: u32) -> Self {
        Self { id, work_id }
    }

    pub fn is_empty(&self) -> bool {
        self.id == 0
    }

    /// Compare identities, ignoring the draft version.
    pub fn eq_ignore_work_id(&self, other: &ContentRef) -> bool {
        self.id == other.id
    }

    /// The published version of this reference.
    pub fn published(self) -> Self {
        Self::new(self.id)
    }
}

impl From<u64> for ContentRef {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.work_id == 0 {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{}_{}", self.id, self.work_id)
        }
    }
}

/// A content language, normalized to lowercase (e.g. `en`, `sv-se`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Locale {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for Locale {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// CMS page; routed by page routing, never by the catalog router.
    Page,
    /// A catalog (or the catalog root).
    Catalog,
    /// Category node.
    Category,
    /// Product entry. Terminal leaf for routing purposes.
    Product,
    /// Product variant. Routed hierarchically below its product.
    Variant,
}

impl ContentKind {
    /// Whether the catalog router is responsible for this kind.
    pub fn is_catalog_content(&self) -> bool {
        !matches!(self, ContentKind::Page)
    }

    /// Leaf nodes are addressed by their own SEO path instead of a tree path.
    pub fn is_leaf(&self) -> bool {
        matches!(self, ContentKind::Product)
    }
}

/// A node in the content tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentNode {
    pub link: ContentRef,

    /// Parent node; `None` only for tree roots.
    #[serde(default)]
    pub parent: Option<ContentRef>,

    /// Display name.
    pub name: String,

    pub kind: ContentKind,

    /// URL segment used when no localized segment exists.
    pub route_segment: String,

    #[serde(default)]
    pub localized_segments: HashMap<Locale, String>,

    /// Precomputed flat SEO paths, per locale.
    #[serde(default)]
    pub seo_uris: HashMap<Locale, String>,
}

impl ContentNode {
    pub fn new(
        link: impl Into<ContentRef>,
        parent: Option<ContentRef>,
        kind: ContentKind,
        name: impl Into<String>,
        route_segment: impl Into<String>,
    ) -> Self {
        Self {
            link: link.into(),
            parent,
            name: name.into(),
            kind,
            route_segment: route_segment.into(),
            localized_segments: HashMap::new(),
            seo_uris: HashMap::new(),
        }
    }

    pub fn with_segment(mut self, locale: impl Into<Locale>, segment: impl Into<String>) -> Self {
        self.localized_segments.insert(locale.into(), segment.into());
        self
    }

    pub fn with_seo_uri(mut self, locale: impl Into<Locale>, seo_uri: impl Into<String>) -> Self {
        self.seo_uris.insert(locale.into(), seo_uri.into());
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }

    /// URL segment for `locale`, falling back to the default route segment.
    pub fn url_segment(&self, locale: &Locale) -> &str {
        self.localized_segments
            .get(locale)
            .map(String::as_str)
            .unwrap_or(&self.route_segment)
    }

    /// Non-empty SEO path for `locale`, if any.
    pub fn seo_uri(&self, locale: &Locale) -> Option<&str> {
        self.seo_uris
            .get(locale)
            .map(|s| s.trim_matches('/'))
            .filter(|s| !s.is_empty())
    }
}
