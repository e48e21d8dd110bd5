use {
    crate::{domain::PriceBar, error::FiboError, utils::TimeUtils},
    serde::{Deserialize, Serialize},
};

/// An ordered run of bars for one symbol at one interval.
/// Construction is the ingestion boundary: timestamps strictly increase and prices are finite.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BarSeries {
    pub symbol: String,
    pub interval_ms: i64,
    bars: Vec<PriceBar>,
}

impl BarSeries {
    pub fn new(symbol: &str, interval_ms: i64, bars: Vec<PriceBar>) -> Result<Self, FiboError> {
        validate_bars(&bars)?;
        Ok(Self {
            symbol: symbol.to_string(),
            interval_ms,
            bars,
        })
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The most recent `count` bars (or all of them if there are fewer).
    pub fn tail(&self, count: usize) -> &[PriceBar] {
        let start = self.bars.len().saturating_sub(count);
        &self.bars[start..]
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }
}

impl std::fmt::Display for BarSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({} bars)",
            self.symbol,
            TimeUtils::interval_to_string(self.interval_ms),
            self.bars.len()
        )
    }
}

/// Checks the ordering and finiteness invariants of a bar sequence.
pub fn validate_bars(bars: &[PriceBar]) -> Result<(), FiboError> {
    for (index, bar) in bars.iter().enumerate() {
        if !bar.is_finite() {
            return Err(FiboError::NonFiniteBar { index });
        }
        if index > 0 && bar.timestamp_ms <= bars[index - 1].timestamp_ms {
            return Err(FiboError::UnorderedBars { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(ts: i64, close: f64) -> PriceBar {
        PriceBar::new(ts, close, close, close, close, 1.0)
    }

    #[test]
    fn test_accepts_ordered_bars() {
        let series = BarSeries::new("XRPUSDT", TimeUtils::MS_IN_H, vec![bar(1, 1.0), bar(2, 2.0), bar(3, 3.0)])
            .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.last_close(), Some(3.0));
        assert_eq!(series.tail(2).len(), 2);
        assert_eq!(series.tail(10).len(), 3);
        assert_eq!(series.to_string(), "XRPUSDT 1h (3 bars)");
    }

    #[test]
    fn test_rejects_duplicate_timestamp() {
        let err = BarSeries::new("X", TimeUtils::MS_IN_H, vec![bar(1, 1.0), bar(1, 2.0)]).unwrap_err();
        assert_eq!(err, FiboError::UnorderedBars { index: 1 });
    }

    #[test]
    fn test_rejects_backwards_timestamp() {
        let err = validate_bars(&[bar(5, 1.0), bar(6, 1.0), bar(4, 1.0)]).unwrap_err();
        assert_eq!(err, FiboError::UnorderedBars { index: 2 });
    }

    #[test]
    fn test_rejects_nan_close() {
        let err = validate_bars(&[bar(1, 1.0), bar(2, f64::NAN)]).unwrap_err();
        assert_eq!(err, FiboError::NonFiniteBar { index: 1 });
    }
}
