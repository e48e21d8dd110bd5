use anyhow::Result;

use crate::domain::{MarketQuery, PriceRange};
use crate::models::BarSeries;

/// Swing high/low for a market at a (coarse) interval.
pub trait RangeProvider: Send + Sync {
    fn price_range(&self, market: &MarketQuery, interval_ms: i64, swing_bars: usize) -> Result<PriceRange>;
}

/// Latest price for a market at a (fine) interval.
pub trait PriceProvider: Send + Sync {
    fn current_price(&self, market: &MarketQuery, interval_ms: i64) -> Result<f64>;
}

/// Abstract interface for fetching ordered bars.
pub trait BarProvider: Send + Sync {
    /// The most recent `limit` bars, oldest first.
    fn fetch_bars(&self, market: &MarketQuery, interval_ms: i64, limit: usize) -> Result<BarSeries>;
}
