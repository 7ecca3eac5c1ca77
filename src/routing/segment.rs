//! URL path segment handling.
//!
//! # Responsibilities
//! - Walk a path one segment at a time without mutating it
//! - Detect and strip a leading market segment
//! - Rewrite generated paths for edit and preview modes

use crate::catalog::types::ContentRef;
use crate::market::types::MarketId;
use crate::routing::context::ContextMode;

/// Path segment separator.
pub const SEPARATOR: char = '/';

/// Separator between a path and the content link in edit/preview URLs.
const EDIT_LINK_SEPARATOR: &str = ",,";

/// Immutable position in a path. Advancing returns a new cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCursor<'a> {
    rest: &'a str,
}

impl<'a> PathCursor<'a> {
    pub fn new(path: &'a str) -> Self {
        Self { rest: path }
    }

    /// The unconsumed suffix.
    pub fn rest(&self) -> &'a str {
        self.rest
    }

    /// True when nothing but separators remains.
    pub fn is_exhausted(&self) -> bool {
        self.rest.trim_matches(SEPARATOR).is_empty()
    }

    /// The next segment, without consuming it.
    pub fn peek(&self) -> &'a str {
        self.advance().0
    }

    /// Consume the next segment.
    pub fn advance(self) -> (&'a str, PathCursor<'a>) {
        match self.rest.find(SEPARATOR) {
            Some(index) => (
                &self.rest[..index],
                PathCursor::new(&self.rest[index + SEPARATOR.len_utf8()..]),
            ),
            None => (self.rest, PathCursor::new("")),
        }
    }
}

/// Strip a leading market segment.
///
/// Returns the remainder and the matched market (as configured) when the
/// first segment names one of `known_markets`, ignoring case. Otherwise the
/// path comes back unchanged.
pub fn extract_market_segment<'a>(
    path: &'a str,
    known_markets: &[MarketId],
) -> (&'a str, Option<MarketId>) {
    let (segment, rest) = PathCursor::new(path).advance();
    if segment.is_empty() {
        return (path, None);
    }
    match known_markets.iter().find(|m| m.matches_segment(segment)) {
        Some(market) => (rest.rest(), Some(market.clone())),
        None => (path, None),
    }
}

/// Edit and preview URLs address a specific content version.
pub fn rewrite_for_context_mode(link: &ContentRef, path: &str, mode: ContextMode) -> String {
    match mode {
        ContextMode::Default => path.to_string(),
        ContextMode::Edit | ContextMode::Preview => format!(
            "{}{}{}",
            path.trim_end_matches(SEPARATOR),
            EDIT_LINK_SEPARATOR,
            link
        ),
    }
}
