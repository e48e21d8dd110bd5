use thiserror::Error;

/// Failures raised by the analysis core.
/// None of these are fatal: every one is handed back to the caller as a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FiboError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Insufficient history: need at least {needed} bars, got {got}")]
    InsufficientHistory { needed: usize, got: usize },

    #[error("Invalid price range: high {high} is below low {low}")]
    InvalidRange { high: f64, low: f64 },

    #[error("Bars out of order: timestamp at index {index} does not increase")]
    UnorderedBars { index: usize },

    #[error("Bar at index {index} has a non-finite price")]
    NonFiniteBar { index: usize },

    #[error("Level set has no {0} level")]
    MissingLevel(&'static str),

    #[error("Model failure: {0}")]
    ModelFailure(String),
}

impl FiboError {
    pub(crate) fn require_bars(needed: usize, got: usize) -> Result<(), Self> {
        if got < needed {
            Err(Self::InsufficientHistory { needed, got })
        } else {
            Ok(())
        }
    }
}
