//! Current market resolution.

use std::sync::Arc;

use crate::market::service::MarketService;
use crate::market::types::{MarketError, MarketId};
use crate::routing::context::RequestContext;

/// Resolves the market active for a request.
pub trait CurrentMarket: Send + Sync {
    fn current_market(&self, request: &RequestContext) -> MarketId;
}

/// Uses the market recorded on the request when it is a known, enabled
/// market; otherwise the configured default.
pub struct RequestMarketResolver {
    markets: Arc<dyn MarketService>,
    default_market: MarketId,
}

impl RequestMarketResolver {
    /// Fails when the default market is unknown or disabled.
    pub fn new(markets: Arc<dyn MarketService>, default_market: MarketId) -> Result<Self, MarketError> {
        let market = markets
            .get_market(&default_market)
            .ok_or_else(|| MarketError::UnknownDefaultMarket(default_market.to_string()))?;
        if !market.enabled {
            return Err(MarketError::DisabledDefaultMarket(default_market.to_string()));
        }
        Ok(Self {
            markets,
            default_market: market.id,
        })
    }

    pub fn default_market(&self) -> &MarketId {
        &self.default_market
    }
}

impl CurrentMarket for RequestMarketResolver {
    fn current_market(&self, request: &RequestContext) -> MarketId {
        request
            .market()
            .and_then(|id| self.markets.get_market(id))
            .filter(|market| market.enabled)
            .map(|market| market.id)
            .unwrap_or_else(|| self.default_market.clone())
    }
}
