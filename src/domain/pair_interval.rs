use serde::{Deserialize, Serialize};

pub const DEFAULT_SCREENER: &str = "crypto";

/// Names one market for the data providers: symbol, exchange and screener.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct MarketQuery {
    pub symbol: String,
    pub exchange: String,
    pub screener: String,
}

impl MarketQuery {
    pub fn new(symbol: &str, exchange: &str, screener: &str) -> Self {
        Self {
            // Providers key files on the bare symbol ("XRP-USD" style input is tolerated)
            symbol: symbol.replace('-', ""),
            exchange: exchange.to_string(),
            screener: screener.to_string(),
        }
    }

    pub fn crypto(symbol: &str, exchange: &str) -> Self {
        Self::new(symbol, exchange, DEFAULT_SCREENER)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl std::fmt::Display for MarketQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{} ({})", self.exchange, self.symbol, self.screener)
    }
}
