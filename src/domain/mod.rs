// Domain types and value objects
mod candle;
mod pair_interval;
mod price_range;

// Re-export commonly used types to the world
pub use candle::PriceBar;
pub use pair_interval::{DEFAULT_SCREENER, MarketQuery};
pub use price_range::PriceRange;
