//! Feature definition shared by training and inference.
//!
//! Both [`extract_features`] (inference) and [`build_training_set`] (training) build
//! their rows through [`features_at`]. A model trained on one feature definition is
//! meaningless against another, so there is exactly one.

use serde::{Deserialize, Serialize};

use crate::analysis::fibonacci::{FiboRatio, LevelSet, compute_levels};
use crate::domain::{PriceBar, PriceRange};
use crate::error::FiboError;

/// Fixed-arity model input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Last close minus the close before it
    pub price_diff: f64,
    /// Last close is strictly above the 61.8% level
    pub above_golden_ratio: bool,
}

impl FeatureVector {
    pub const NUM_FEATURES: usize = 2;
    pub const FEATURE_NAMES: [&'static str; Self::NUM_FEATURES] = ["price_diff", "above_0.618"];

    /// Convert to a fixed-size array for the classifier.
    pub fn to_array(&self) -> [f64; Self::NUM_FEATURES] {
        [self.price_diff, if self.above_golden_ratio { 1.0 } else { 0.0 }]
    }
}

/// One labeled training row. `label` is 1 when the close `horizon` bars ahead is higher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledRow {
    pub features: FeatureVector,
    pub label: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingSet {
    pub rows: Vec<LabeledRow>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Chronological split: the last `holdout_fraction` of rows become the test set.
    pub fn train_test_split(&self, holdout_fraction: f64) -> (TrainingSet, TrainingSet) {
        let fraction = holdout_fraction.clamp(0.0, 1.0);
        let test_len = (self.rows.len() as f64 * fraction).round() as usize;
        let split = self.rows.len() - test_len.min(self.rows.len());
        let (train, test) = self.rows.split_at(split);
        (
            TrainingSet { rows: train.to_vec() },
            TrainingSet { rows: test.to_vec() },
        )
    }

    pub fn positive_count(&self) -> usize {
        self.rows.iter().filter(|r| r.label == 1).count()
    }
}

/// Feature row for bar `idx` against `levels`. Requires `idx >= 1`.
pub fn features_at(bars: &[PriceBar], idx: usize, levels: &LevelSet) -> Result<FeatureVector, FiboError> {
    if idx == 0 || idx >= bars.len() {
        return Err(FiboError::InsufficientHistory {
            needed: 2,
            got: bars.len().min(idx + 1),
        });
    }
    let golden = levels
        .get(FiboRatio::GOLDEN)
        .ok_or(FiboError::MissingLevel(FiboRatio::GOLDEN.label()))?;

    let close = bars[idx].close;
    Ok(FeatureVector {
        price_diff: close - bars[idx - 1].close,
        above_golden_ratio: close > golden,
    })
}

/// Inference-time features for the latest bar, with levels from the same window.
pub fn extract_features(bars: &[PriceBar]) -> Result<FeatureVector, FiboError> {
    FiboError::require_bars(2, bars.len())?;
    let levels = window_levels(bars)?;
    features_at(bars, bars.len() - 1, &levels)
}

/// Training rows over the whole window: levels from the window's swing range,
/// label `close[i + horizon] > close[i]` for every bar that has one.
pub fn build_training_set(bars: &[PriceBar], label_horizon: usize) -> Result<TrainingSet, FiboError> {
    let horizon = label_horizon.max(1);
    FiboError::require_bars(horizon + 2, bars.len())?;
    let levels = window_levels(bars)?;

    let rows = (1..bars.len() - horizon)
        .map(|i| {
            let features = features_at(bars, i, &levels)?;
            let label = u8::from(bars[i + horizon].close > bars[i].close);
            Ok(LabeledRow { features, label })
        })
        .collect::<Result<Vec<_>, FiboError>>()?;

    log::info!(
        "build_training_set(): {} bars -> {} rows (horizon {})",
        bars.len(),
        rows.len(),
        horizon
    );

    Ok(TrainingSet { rows })
}

fn window_levels(bars: &[PriceBar]) -> Result<LevelSet, FiboError> {
    let range = PriceRange::from_bars(bars)?;
    Ok(compute_levels(range.high(), range.low()))
}
