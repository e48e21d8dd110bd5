use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::domain::PriceRange;

/// The seven canonical retracement ratios, declared in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter)]
pub enum FiboRatio {
    R0,
    R236,
    R382,
    R500,
    R618,
    R786,
    R1000,
}

impl FiboRatio {
    /// The "golden ratio" level, used as a feature boundary.
    pub const GOLDEN: Self = Self::R618;

    pub fn value(&self) -> f64 {
        match self {
            Self::R0 => 0.0,
            Self::R236 => 0.236,
            Self::R382 => 0.382,
            Self::R500 => 0.5,
            Self::R618 => 0.618,
            Self::R786 => 0.786,
            Self::R1000 => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::R0 => "0.0%",
            Self::R236 => "23.6%",
            Self::R382 => "38.2%",
            Self::R500 => "50.0%",
            Self::R618 => "61.8%",
            Self::R786 => "78.6%",
            Self::R1000 => "100.0%",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::iter().find(|r| r.label() == label)
    }
}

impl std::fmt::Display for FiboRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One labeled price level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiboLevel {
    pub ratio: FiboRatio,
    pub price: f64,
}

/// Retracement levels as an explicit sequence, always iterated ratio-ascending.
/// That order is what the proximity tie-break relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSet {
    levels: Vec<FiboLevel>,
}

impl LevelSet {
    /// Builds a set from arbitrary levels, sorting them by ratio.
    /// Prices are taken as given: no monotonicity is imposed here.
    pub fn from_levels(mut levels: Vec<FiboLevel>) -> Self {
        levels.sort_by_key(|l| l.ratio);
        levels.dedup_by_key(|l| l.ratio);
        Self { levels }
    }

    /// Checked path: the range has already been validated as `high >= low`.
    pub fn from_range(range: &PriceRange) -> Self {
        compute_levels(range.high(), range.low())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FiboLevel> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, ratio: FiboRatio) -> Option<f64> {
        self.levels.iter().find(|l| l.ratio == ratio).map(|l| l.price)
    }

    pub fn golden_ratio(&self) -> Option<f64> {
        self.get(FiboRatio::GOLDEN)
    }

    pub fn prices(&self) -> Vec<f64> {
        self.levels.iter().map(|l| l.price).collect()
    }
}

impl<'a> IntoIterator for &'a LevelSet {
    type Item = &'a FiboLevel;
    type IntoIter = std::slice::Iter<'a, FiboLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

/// `level(ratio) = high - ratio * (high - low)` for every canonical ratio.
///
/// No validation: passing `high < low` yields an inverted set where the 100% level
/// sits above the 0% level. Use [`LevelSet::from_range`] with a checked
/// [`PriceRange`] to rule that out.
pub fn compute_levels(high: f64, low: f64) -> LevelSet {
    let diff = high - low;

    let levels = FiboRatio::iter()
        .map(|ratio| {
            // The end points are pinned so they equal the inputs bit-for-bit
            let price = match ratio {
                FiboRatio::R0 => high,
                FiboRatio::R1000 => low,
                _ => high - ratio.value() * diff,
            };
            FiboLevel { ratio, price }
        })
        .collect();

    LevelSet { levels }
}
