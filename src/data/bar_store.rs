use {
    crate::{
        config::{PERSISTENCE, bar_filename},
        data::{BarProvider, PriceProvider, RangeProvider},
        domain::{MarketQuery, PriceBar, PriceRange},
        error::FiboError,
        models::BarSeries,
    },
    anyhow::{Context, Result},
    std::{
        fs::{self, File},
        io::{BufReader, BufWriter},
        path::{Path, PathBuf},
    },
};

/// Bar files on local disk, one `<SYMBOL>_<interval>.json` per series.
/// Stands in for an exchange client: the analysis only sees the provider traits.
#[derive(Debug, Clone)]
pub struct LocalBarStore {
    directory: PathBuf,
}

impl Default for LocalBarStore {
    fn default() -> Self {
        Self::new(PERSISTENCE.bars.directory)
    }
}

impl LocalBarStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, symbol: &str, interval_ms: i64) -> PathBuf {
        self.directory.join(bar_filename(symbol, interval_ms))
    }

    /// Whole series for `symbol` at `interval_ms`, validated on load.
    pub fn load_series(&self, symbol: &str, interval_ms: i64) -> Result<BarSeries> {
        let path = self.path_for(symbol, interval_ms);
        if !path.exists() {
            return Err(FiboError::DataUnavailable(format!("no bar file at {}", path.display())).into());
        }
        let bars = load_bars_file(&path)?;
        let series = BarSeries::new(symbol, interval_ms, bars)
            .with_context(|| format!("Invalid bar data in {}", path.display()))?;
        Ok(series)
    }

    pub fn save_series(&self, series: &BarSeries) -> Result<PathBuf> {
        let path = self.path_for(&series.symbol, series.interval_ms);
        let file = create_file_with_parents(&path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), series.bars())
            .with_context(|| format!("Failed to write bars to {}", path.display()))?;
        log::info!("Saved {} to {}", series, path.display());
        Ok(path)
    }
}

impl BarProvider for LocalBarStore {
    fn fetch_bars(&self, market: &MarketQuery, interval_ms: i64, limit: usize) -> Result<BarSeries> {
        let series = self.load_series(market.symbol(), interval_ms)?;
        if series.is_empty() {
            return Err(FiboError::DataUnavailable(format!("no bars stored for {}", market)).into());
        }
        let tail = series.tail(limit).to_vec();
        Ok(BarSeries::new(market.symbol(), interval_ms, tail)?)
    }
}

impl RangeProvider for LocalBarStore {
    fn price_range(&self, market: &MarketQuery, interval_ms: i64, swing_bars: usize) -> Result<PriceRange> {
        let series = self.fetch_bars(market, interval_ms, swing_bars.max(1))?;
        Ok(PriceRange::from_bars(series.bars())?)
    }
}

impl PriceProvider for LocalBarStore {
    fn current_price(&self, market: &MarketQuery, interval_ms: i64) -> Result<f64> {
        let series = self.fetch_bars(market, interval_ms, 1)?;
        series
            .last_close()
            .ok_or_else(|| FiboError::DataUnavailable(format!("no price for {}", market)).into())
    }
}

/// Reads a JSON array of bars. Ordering is not checked here; wrap in [`BarSeries`] for that.
pub fn load_bars_file(path: &Path) -> Result<Vec<PriceBar>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let reader = BufReader::new(file);
    let bars: Vec<PriceBar> = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse bars from: {:?}", path))?;
    Ok(bars)
}

// Helper function to create a new file and any missing parent directories.
pub(crate) fn create_file_with_parents(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::TimeUtils;

    fn bars(closes: &[f64]) -> Vec<PriceBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar::new(i as i64 * TimeUtils::MS_IN_H, c, c + 1.0, c - 1.0, c, 10.0))
            .collect()
    }

    fn seeded_store(dir: &Path) -> LocalBarStore {
        let store = LocalBarStore::new(dir);
        let hourly = BarSeries::new("XRPUSDT", TimeUtils::MS_IN_H, bars(&[2.0, 3.0, 2.5, 2.8])).unwrap();
        store.save_series(&hourly).unwrap();
        store
    }

    #[test]
    fn test_save_and_fetch_tail() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(dir.path());
        let market = MarketQuery::crypto("XRPUSDT", "BINANCE");

        let series = store.fetch_bars(&market, TimeUtils::MS_IN_H, 2).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.bars()[0].close, 2.5);
        assert_eq!(series.last_close(), Some(2.8));
    }

    #[test]
    fn test_range_and_price() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(dir.path());
        let market = MarketQuery::crypto("XRPUSDT", "BINANCE");

        let range = store.price_range(&market, TimeUtils::MS_IN_H, 3).unwrap();
        // Last three bars: highs 4.0, 3.5, 3.8 / lows 2.0, 1.5, 1.8
        assert_eq!(range.high(), 4.0);
        assert_eq!(range.low(), 1.5);

        // Zero swing bars still reads the latest bar
        let latest = store.price_range(&market, TimeUtils::MS_IN_H, 0).unwrap();
        assert_eq!(latest.high(), 3.8);

        assert_eq!(store.current_price(&market, TimeUtils::MS_IN_H).unwrap(), 2.8);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBarStore::new(dir.path());
        let market = MarketQuery::crypto("NOPEUSDT", "BINANCE");
        let err = store.current_price(&market, TimeUtils::MS_IN_MIN).unwrap_err();
        assert!(matches!(err.downcast_ref::<FiboError>(), Some(FiboError::DataUnavailable(_))));

        // An empty array parses but still has no price
        let empty = BarSeries::new("NOPEUSDT", TimeUtils::MS_IN_MIN, vec![]).unwrap();
        store.save_series(&empty).unwrap();
        let err = store.current_price(&market, TimeUtils::MS_IN_MIN).unwrap_err();
        assert!(matches!(err.downcast_ref::<FiboError>(), Some(FiboError::DataUnavailable(_))));
    }

    #[test]
    fn test_unordered_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBarStore::new(dir.path());
        let path = store.path_for("BAD", TimeUtils::MS_IN_H);
        let mut data = bars(&[1.0, 2.0]);
        data.reverse();
        serde_json::to_writer(create_file_with_parents(&path).unwrap(), &data).unwrap();

        let err = store.load_series("BAD", TimeUtils::MS_IN_H).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FiboError>(),
            Some(&FiboError::UnorderedBars { index: 1 })
        );
    }
}
