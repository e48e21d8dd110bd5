//! Analysis and computation configuration

use serde::{Deserialize, Serialize};

use crate::config::TolerancePct;
use crate::utils::TimeUtils;

pub const DEFAULT_TOLERANCE_RATIO: f64 = 0.003;

/// Configuration for the two-timeframe proximity signal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignalSettings {
    /// Coarse interval used to anchor the swing high/low (the "macro" view).
    pub macro_interval_ms: i64,
    /// Fine interval used to sample the current price (the "micro" view).
    pub micro_interval_ms: i64,
    /// How many of the most recent macro bars form the swing window.
    pub swing_bars: usize,
    /// Half-width of the proximity band, as a fraction of the current price.
    /// Wider bands mean more "near level" alerts, and more false positives.
    pub tolerance: TolerancePct,
}

/// Settings for building the classifier's training rows
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrainingSettings {
    // Label is "close N steps ahead > close now"
    pub label_horizon: usize,
    // Bars requested from the bar provider for one training run
    pub bar_limit: usize,
    // Fraction of the (chronologically last) rows held out for scoring
    pub holdout_fraction: f64,
}

/// The Master Analysis Configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub signal: SignalSettings,
    pub training: TrainingSettings,
    // Bars per market loaded by the scanner for breakout detection
    pub scan_bar_limit: usize,
}

impl Default for SignalSettings {
    fn default() -> Self {
        ANALYSIS.signal.clone()
    }
}

impl Default for TrainingSettings {
    fn default() -> Self {
        ANALYSIS.training.clone()
    }
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    signal: SignalSettings {
        macro_interval_ms: TimeUtils::MS_IN_H,
        micro_interval_ms: TimeUtils::MS_IN_MIN,
        // A single 1h bar: the swing is the latest hourly high/low
        swing_bars: 1,
        tolerance: TolerancePct::new(DEFAULT_TOLERANCE_RATIO), // 0.3%
    },

    training: TrainingSettings {
        label_horizon: 3,
        bar_limit: 500,
        holdout_fraction: 0.2,
    },

    scan_bar_limit: 100,
};
