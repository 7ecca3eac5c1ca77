//! Known markets.

use crate::config::schema::MarketsConfig;
use crate::market::types::{Market, MarketId};

/// Source of the configured markets.
pub trait MarketService: Send + Sync {
    /// All markets, enabled or not.
    fn all_markets(&self) -> Vec<Market>;

    /// Look up a market by id (case-insensitive).
    fn get_market(&self, id: &MarketId) -> Option<Market> {
        self.all_markets().into_iter().find(|m| &m.id == id)
    }

    /// Ids of markets that may appear in URLs.
    fn enabled_market_ids(&self) -> Vec<MarketId> {
        self.all_markets()
            .into_iter()
            .filter(|m| m.enabled)
            .map(|m| m.id)
            .collect()
    }
}

/// Markets taken from configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredMarkets {
    markets: Vec<Market>,
}

impl ConfiguredMarkets {
    pub fn new(markets: Vec<Market>) -> Self {
        Self { markets }
    }

    pub fn from_config(config: &MarketsConfig) -> Self {
        Self::new(
            config
                .markets
                .iter()
                .map(|m| Market {
                    id: MarketId::new(m.id.clone()),
                    name: m.name.clone(),
                    enabled: m.enabled,
                })
                .collect(),
        )
    }
}

impl MarketService for ConfiguredMarkets {
    fn all_markets(&self) -> Vec<Market> {
        self.markets.clone()
    }

    fn get_market(&self, id: &MarketId) -> Option<Market> {
        self.markets.iter().find(|m| &m.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::MarketConfig;

    #[test]
    fn test_from_config() {
        let config = MarketsConfig {
            default_market: "US".into(),
            markets: vec![
                MarketConfig { id: "US".into(), name: "United States".into(), enabled: true },
                MarketConfig { id: "CN".into(), name: "China".into(), enabled: false },
            ],
        };
        let markets = ConfiguredMarkets::from_config(&config);
        assert_eq!(markets.all_markets().len(), 2);
        assert_eq!(markets.enabled_market_ids(), vec![MarketId::new("US")]);
        assert_eq!(
            markets.get_market(&MarketId::new("cn")).map(|m| m.name),
            Some("China".to_string())
        );
    }
}
