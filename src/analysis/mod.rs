// Analysis algorithms: retracement levels, breakouts, proximity and features
pub mod breakout;
pub mod features;
pub mod fibonacci;
pub mod proximity;

pub use breakout::{CrossingDirection, CrossingEvent, classify_crossing, detect_crossings};
pub use features::{
    FeatureVector, LabeledRow, TrainingSet, build_training_set, extract_features, features_at,
};
pub use fibonacci::{FiboLevel, FiboRatio, LevelSet, compute_levels};
pub use proximity::{
    AlertKind, ProximityAlert, UnavailableReason, find_proximate, generate_signal,
};
