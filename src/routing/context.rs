//! Request-scoped routing state.
//!
//! Every value here is owned by a single routing or generation attempt and
//! never shared between requests.

use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::catalog::types::{ContentNode, ContentRef, Locale};
use crate::market::types::MarketId;
use crate::routing::segment::PathCursor;

/// Route value holding the routed content identity.
pub const CONTENT_LINK_KEY: &str = "node";

/// Ambient data about the current request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    id: Uuid,
    market: Option<MarketId>,
}

impl RequestContext {
    /// A fresh request with a new request id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            market: None,
        }
    }

    pub fn with_market(mut self, market: MarketId) -> Self {
        self.market = Some(market);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Market selected for this request, if any.
    pub fn market(&self) -> Option<&MarketId> {
        self.market.as_ref()
    }

    pub fn set_market(&mut self, market: MarketId) {
        self.market = Some(market);
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Fallback content language when a request does not name one.
pub trait ContentLanguageAccessor: Send + Sync {
    fn language(&self) -> Locale;
}

/// A fixed fallback language, typically the configured default.
#[derive(Debug, Clone)]
pub struct FixedContentLanguage(pub Locale);

impl ContentLanguageAccessor for FixedContentLanguage {
    fn language(&self) -> Locale {
        self.0.clone()
    }
}

/// State of one inbound routing attempt.
#[derive(Debug, Clone)]
pub struct UrlResolverContext {
    pub request: RequestContext,
    /// Language explicitly requested (e.g. from a language segment).
    pub requested_language: Option<Locale>,
    remaining_path: String,
    content: Option<Arc<ContentNode>>,
}

impl UrlResolverContext {
    pub fn new(request: RequestContext, remaining_path: impl Into<String>) -> Self {
        Self {
            request,
            requested_language: None,
            remaining_path: remaining_path.into(),
            content: None,
        }
    }

    pub fn with_language(mut self, language: Option<Locale>) -> Self {
        self.requested_language = language;
        self
    }

    /// The not yet consumed suffix of the URL path.
    pub fn remaining_path(&self) -> &str {
        &self.remaining_path
    }

    pub fn set_remaining_path(&mut self, path: impl Into<String>) {
        self.remaining_path = path.into();
    }

    /// A cursor positioned at the start of the remaining path.
    pub fn cursor(&self) -> PathCursor<'_> {
        PathCursor::new(&self.remaining_path)
    }

    /// Content matched by a router.
    pub fn content(&self) -> Option<&Arc<ContentNode>> {
        self.content.as_ref()
    }

    pub fn set_content(&mut self, content: Arc<ContentNode>) {
        self.content = Some(content);
    }
}

/// How the generated URL will be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContextMode {
    #[default]
    Default,
    Edit,
    Preview,
}

/// Options that change the shape of a generated URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UrlGeneratorOptions {
    /// Prefix the configured site URL.
    pub force_absolute: bool,
}

/// State of one outbound generation attempt.
#[derive(Debug, Clone)]
pub struct UrlGeneratorContext {
    pub request: RequestContext,
    pub content_link: ContentRef,
    /// Explicitly requested language.
    pub language: Option<Locale>,
    pub mode: ContextMode,
    pub route_values: BTreeMap<String, String>,
}

impl UrlGeneratorContext {
    pub fn new(request: RequestContext, content_link: ContentRef) -> Self {
        let mut route_values = BTreeMap::new();
        route_values.insert(CONTENT_LINK_KEY.to_string(), content_link.to_string());
        Self {
            request,
            content_link,
            language: None,
            mode: ContextMode::Default,
            route_values,
        }
    }

    pub fn with_language(mut self, language: Option<Locale>) -> Self {
        self.language = language;
        self
    }

    pub fn with_mode(mut self, mode: ContextMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Result of outbound generation by a partial router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialRouteData {
    /// Page the partial path is appended to.
    pub base_path_root: ContentRef,
    pub partial_virtual_path: String,
}
