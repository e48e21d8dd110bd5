//! File persistence and serialization configuration
use crate::utils::TimeUtils;

/// Configuration for local bar files
pub struct BarPersistenceConfig {
    /// Directory holding `<SYMBOL>_<interval>.json` bar files
    pub directory: &'static str,
    pub extension: &'static str,
}

/// Configuration for the trained model artifact
pub struct ModelPersistenceConfig {
    /// Path the trainer writes to and the predictor loads from
    pub path: &'static str,
    /// Current version of the model serialization format
    pub version: f64,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub bars: BarPersistenceConfig,
    pub model: ModelPersistenceConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    bars: BarPersistenceConfig {
        directory: "bar_data",
        extension: "json",
    },
    model: ModelPersistenceConfig {
        path: "ml/fibo_model.bin",
        version: 1.0,
    },
};

/// Generate symbol- and interval-specific bar filename
/// Example: "XRPUSDT_1h.json"
pub fn bar_filename(symbol: &str, interval_ms: i64) -> String {
    let interval_str = TimeUtils::interval_to_string(interval_ms);

    format!(
        "{}_{}.{}",
        symbol, interval_str, PERSISTENCE.bars.extension
    )
}
