use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, Normal};

use crate::analysis::{FeatureVector, LabeledRow, TrainingSet};
use crate::error::FiboError;
use crate::models::Classifier;
use crate::utils::mean_and_stddev;

// Floor for the per-class spread so a constant feature can't produce a zero-width Gaussian
const MIN_STD: f64 = 1e-9;
// Laplace smoothing for the boolean feature
const ALPHA: f64 = 1.0;

/// Per-class parameters: prior, Gaussian over `price_diff`, Bernoulli over `above_golden_ratio`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
    pub prior: f64,
    pub diff_mean: f64,
    pub diff_std: f64,
    pub p_above: f64,
    pub count: usize,
}

impl ClassStats {
    fn fit(rows: &[FeatureVector], total: usize) -> Self {
        let diffs: Vec<f64> = rows.iter().map(|f| f.price_diff).collect();
        let (diff_mean, diff_std) = mean_and_stddev(&diffs);
        let above = rows.iter().filter(|f| f.above_golden_ratio).count();

        Self {
            prior: rows.len() as f64 / total as f64,
            diff_mean,
            diff_std: diff_std.max(MIN_STD),
            p_above: (above as f64 + ALPHA) / (rows.len() as f64 + 2.0 * ALPHA),
            count: rows.len(),
        }
    }

    fn log_posterior(&self, features: &FeatureVector) -> Result<f64, FiboError> {
        let normal = Normal::new(self.diff_mean, self.diff_std)
            .map_err(|e| FiboError::ModelFailure(format!("bad class parameters: {}", e)))?;

        let p_bool = if features.above_golden_ratio { self.p_above } else { 1.0 - self.p_above };

        Ok(self.prior.ln() + normal.ln_pdf(features.price_diff) + p_bool.ln())
    }
}

/// Reference classifier shipped with the trainer. Any other `Classifier` can stand in for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaussianNaiveBayes {
    /// Index 0 = no rise, 1 = rise
    pub classes: [ClassStats; 2],
}

impl GaussianNaiveBayes {
    pub const NAME: &'static str = "gaussian-naive-bayes";

    /// Both classes must be present in `set`.
    pub fn fit(set: &TrainingSet) -> Result<Self, FiboError> {
        let (rise, no_rise): (Vec<&LabeledRow>, Vec<&LabeledRow>) =
            set.rows.iter().partition(|r| r.label == 1);
        if rise.is_empty() || no_rise.is_empty() {
            return Err(FiboError::ModelFailure(format!(
                "training set needs both classes (rise: {}, no rise: {})",
                rise.len(),
                no_rise.len()
            )));
        }

        let total = set.len();
        let no_rise: Vec<FeatureVector> = no_rise.iter().map(|r| r.features).collect();
        let rise: Vec<FeatureVector> = rise.iter().map(|r| r.features).collect();

        Ok(Self {
            classes: [ClassStats::fit(&no_rise, total), ClassStats::fit(&rise, total)],
        })
    }

    /// Fraction of rows in `set` whose label matches the prediction.
    pub fn accuracy(&self, set: &TrainingSet) -> Result<f64, FiboError> {
        if set.is_empty() {
            return Ok(0.0);
        }
        let mut hits = 0;
        for row in &set.rows {
            if self.classify(&row.features)? == row.label {
                hits += 1;
            }
        }
        Ok(hits as f64 / set.len() as f64)
    }
}

impl Classifier for GaussianNaiveBayes {
    fn classify(&self, features: &FeatureVector) -> Result<u8, FiboError> {
        if !features.price_diff.is_finite() {
            return Err(FiboError::ModelFailure(format!(
                "non-finite price_diff {}",
                features.price_diff
            )));
        }
        let no_rise = self.classes[0].log_posterior(features)?;
        let rise = self.classes[1].log_posterior(features)?;

        // Ties go to "no rise"
        Ok(u8::from(rise > no_rise))
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
