//! Small value types shared by config and analysis.

use serde::{Deserialize, Serialize};

/// Proximity tolerance as a fraction of price, clamped to 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TolerancePct(f64);

impl TolerancePct {
    pub const fn new(val: f64) -> Self {
        // NaN fails both comparisons and would slip through, so map it to 0.0 as well
        let v = if val > 1.0 {
            1.0
        } else if val >= 0.0 {
            val
        } else {
            0.0
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Absolute band half-width around `price`.
    pub fn band(self, price: f64) -> f64 {
        self.0 * price
    }
}

impl Default for TolerancePct {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TOLERANCE_RATIO)
    }
}

impl std::fmt::Display for TolerancePct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}%", self.0 * 100.)
    }
}

/// Formats a price with "Trader Precision" adaptive decimals.
pub fn format_price(price: f64) -> String {
    if price == 0.0 {
        return "0.00".to_string();
    }

    let abs_price = price.abs();

    if abs_price >= 1000.0 {
        format!("{:.2}", price)
    } else if abs_price >= 1.0 {
        format!("{:.4}", price)
    } else if abs_price >= 0.01 {
        format!("{:.5}", price)
    } else {
        format!("{:.8}", price)
    }
}
