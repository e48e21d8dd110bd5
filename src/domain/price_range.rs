use serde::{Deserialize, Serialize};

use crate::domain::PriceBar;
use crate::error::FiboError;
use crate::utils::{get_max, get_min};

/// Swing high/low anchoring a set of retracement levels.
/// Always `high >= low` when built through [`PriceRange::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    high: f64,
    low: f64,
}

impl PriceRange {
    pub fn new(high: f64, low: f64) -> Result<Self, FiboError> {
        if !high.is_finite() || !low.is_finite() || high < low {
            return Err(FiboError::InvalidRange { high, low });
        }
        Ok(Self { high, low })
    }

    /// Max high / min low over the window. The window must hold at least one bar.
    pub fn from_bars(bars: &[PriceBar]) -> Result<Self, FiboError> {
        FiboError::require_bars(1, bars.len())?;

        let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();

        Self::new(get_max(&highs), get_min(&lows))
    }

    #[inline]
    pub fn high(&self) -> f64 {
        self.high
    }

    #[inline]
    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn span(&self) -> f64 {
        self.high - self.low
    }
}

impl std::fmt::Display for PriceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} .. {}]", self.low, self.high)
    }
}
