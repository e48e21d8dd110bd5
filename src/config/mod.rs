//! Configuration module for the fibo-sniper application.

// Can all be private now because we have a public re-export.
mod analysis;
mod demo;
mod persistence;
mod types;

// Re-export commonly used items
pub use analysis::{
    ANALYSIS, AnalysisConfig, DEFAULT_TOLERANCE_RATIO, SignalSettings, TrainingSettings,
};
pub use demo::DEMO;
pub use persistence::{PERSISTENCE, bar_filename};
pub use types::{TolerancePct, format_price};
