use serde::{Deserialize, Serialize};

// One OHLCV observation. Immutable once ingested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp_ms: i64,

    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,

    #[serde(default)]
    pub volume: f64,
}

impl PriceBar {
    // A constructor for convenience
    pub fn new(timestamp_ms: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        PriceBar {
            timestamp_ms,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.open.is_finite() && self.high.is_finite() && self.low.is_finite() && self.close.is_finite()
    }
}

