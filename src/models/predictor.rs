use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::{FeatureVector, extract_features};
use crate::domain::PriceBar;
use crate::error::FiboError;

/// Interface for a trained binary classifier.
/// Implementations are read-only after construction and shared across threads.
pub trait Classifier: Send + Sync {
    /// Class index for one vector: 1 = rise expected, 0 = no rise.
    fn classify(&self, features: &FeatureVector) -> Result<u8, FiboError>;

    /// Get model name/type
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectionalLabel {
    Rise,
    NoRise,
}

impl std::fmt::Display for DirectionalLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rise => write!(f, "📈 AI predicts rise"),
            Self::NoRise => write!(f, "📉 AI predicts no rise"),
        }
    }
}

/// Wraps one loaded model. Cloning shares the same model instance.
#[derive(Clone)]
pub struct Predictor {
    model: Arc<dyn Classifier>,
}

impl Predictor {
    pub fn new(model: Arc<dyn Classifier>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Any classifier error, or a class outside {0, 1}, is a `ModelFailure`.
    pub fn predict(&self, features: &FeatureVector) -> Result<DirectionalLabel, FiboError> {
        match self.model.classify(features)? {
            1 => Ok(DirectionalLabel::Rise),
            0 => Ok(DirectionalLabel::NoRise),
            other => Err(FiboError::ModelFailure(format!(
                "{} returned class {} (expected 0 or 1)",
                self.model.name(),
                other
            ))),
        }
    }

    /// Inference path: features for the latest bar of `bars`, then a prediction.
    pub fn predict_bars(&self, bars: &[PriceBar]) -> Result<DirectionalLabel, FiboError> {
        let features = extract_features(bars)?;
        log::debug!("predict_bars(): {:?}", features);
        self.predict(&features)
    }
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor").field("model", &self.model.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(u8);

    impl Classifier for Constant {
        fn classify(&self, _features: &FeatureVector) -> Result<u8, FiboError> {
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    struct Broken;

    impl Classifier for Broken {
        fn classify(&self, _features: &FeatureVector) -> Result<u8, FiboError> {
            Err(FiboError::ModelFailure("corrupt weights".to_string()))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    fn vector() -> FeatureVector {
        FeatureVector { price_diff: 0.5, above_golden_ratio: true }
    }

    #[test]
    fn test_maps_classes_to_labels() {
        let rise = Predictor::new(Arc::new(Constant(1)));
        let no_rise = Predictor::new(Arc::new(Constant(0)));
        assert_eq!(rise.predict(&vector()), Ok(DirectionalLabel::Rise));
        assert_eq!(no_rise.predict(&vector()), Ok(DirectionalLabel::NoRise));
    }

    #[test]
    fn test_unknown_class_is_a_failure() {
        let odd = Predictor::new(Arc::new(Constant(7)));
        assert!(matches!(odd.predict(&vector()), Err(FiboError::ModelFailure(_))));
    }

    #[test]
    fn test_model_error_is_not_defaulted() {
        let broken = Predictor::new(Arc::new(Broken));
        assert_eq!(
            broken.predict(&vector()),
            Err(FiboError::ModelFailure("corrupt weights".to_string()))
        );
    }

    #[test]
    fn test_shared_across_threads() {
        let predictor = Predictor::new(Arc::new(Constant(1)));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let p = predictor.clone();
                std::thread::spawn(move || p.predict(&vector()))
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), Ok(DirectionalLabel::Rise));
        }
    }
}
