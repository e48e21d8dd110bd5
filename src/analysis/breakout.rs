use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::analysis::fibonacci::{FiboRatio, LevelSet};
use crate::domain::PriceBar;
use crate::error::FiboError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossingDirection {
    /// Close moved from below the level to above it
    Bullish,
    /// Close moved from above the level to below it
    Bearish,
}

impl std::fmt::Display for CrossingDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "BUY"),
            Self::Bearish => write!(f, "SELL"),
        }
    }
}

/// A close-to-close transition through one level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingEvent {
    /// Timestamp of the bar that completed the crossing
    pub timestamp_ms: i64,
    pub ratio: FiboRatio,
    pub level_price: f64,
    pub direction: CrossingDirection,
    /// Close of the bar that completed the crossing
    pub price_at_event: f64,
}

/// Strict crossing test. Touching the level on either side is not a crossing.
pub fn classify_crossing(previous: f64, current: f64, level: f64) -> Option<CrossingDirection> {
    if previous < level && current > level {
        Some(CrossingDirection::Bullish)
    } else if previous > level && current < level {
        Some(CrossingDirection::Bearish)
    } else {
        None
    }
}

/// Scans consecutive close pairs for crossings of every level.
/// Events come out in time order, and in level order within one bar pair.
pub fn detect_crossings(bars: &[PriceBar], levels: &LevelSet) -> Result<Vec<CrossingEvent>, FiboError> {
    FiboError::require_bars(2, bars.len())?;

    let events: Vec<CrossingEvent> = bars
        .iter()
        .tuple_windows()
        .flat_map(|(prev, curr)| {
            levels.iter().filter_map(move |level| {
                classify_crossing(prev.close, curr.close, level.price).map(|direction| CrossingEvent {
                    timestamp_ms: curr.timestamp_ms,
                    ratio: level.ratio,
                    level_price: level.price,
                    direction,
                    price_at_event: curr.close,
                })
            })
        })
        .collect();

    log::debug!("detect_crossings(): {} bars, {} events", bars.len(), events.len());

    Ok(events)
}
