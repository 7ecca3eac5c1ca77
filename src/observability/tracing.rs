//! Request spans.

use tracing::Span;

use crate::routing::context::RequestContext;

/// Span covering one routing or generation call.
pub fn request_span(request: &RequestContext, operation: &'static str) -> Span {
    tracing::debug_span!(
        "routing",
        request_id = %request.id(),
        operation,
        market = request.market().map(|m| m.as_str()).unwrap_or("-"),
    )
}
