use {
    crate::{
        analysis::{CrossingEvent, LevelSet, ProximityAlert, detect_crossings, generate_signal},
        config::SignalSettings,
        data::{BarProvider, PriceProvider, RangeProvider},
        domain::{MarketQuery, PriceRange},
        error::FiboError,
        models::{DirectionalLabel, Predictor},
    },
    anyhow::Result,
    rayon::prelude::*,
};

/// What the scanner learned from one market's recent macro bars.
#[derive(Debug, Clone)]
pub struct WindowAnalysis {
    pub range: PriceRange,
    pub levels: LevelSet,
    pub crossings: Vec<CrossingEvent>,
    /// `None` when no predictor was supplied
    pub prediction: Option<Result<DirectionalLabel, FiboError>>,
}

#[derive(Debug)]
pub struct MarketReport {
    pub market: MarketQuery,
    pub window: Result<WindowAnalysis>,
    pub alert: ProximityAlert,
}

impl MarketReport {
    pub fn last_crossing(&self) -> Option<&CrossingEvent> {
        self.window.as_ref().ok().and_then(|w| w.crossings.last())
    }
}

/// Levels, crossings and (optionally) a prediction over the latest `bar_limit` macro bars.
pub fn analyze_window<S>(
    store: &S,
    market: &MarketQuery,
    settings: &SignalSettings,
    bar_limit: usize,
    predictor: Option<&Predictor>,
) -> Result<WindowAnalysis>
where
    S: BarProvider + ?Sized,
{
    let series = store.fetch_bars(market, settings.macro_interval_ms, bar_limit)?;
    let range = PriceRange::from_bars(series.bars())?;
    let levels = LevelSet::from_range(&range);
    let crossings = detect_crossings(series.bars(), &levels)?;
    let prediction = predictor.map(|p| p.predict_bars(series.bars()));

    Ok(WindowAnalysis {
        range,
        levels,
        crossings,
        prediction,
    })
}

/// Runs every market independently on the rayon pool.
/// A failing market yields a report carrying its error; the rest are unaffected.
pub fn scan_markets<S>(
    store: &S,
    markets: &[MarketQuery],
    settings: &SignalSettings,
    bar_limit: usize,
    predictor: Option<&Predictor>,
) -> Vec<MarketReport>
where
    S: BarProvider + RangeProvider + PriceProvider + ?Sized,
{
    let start_time = std::time::Instant::now();

    let reports: Vec<MarketReport> = markets
        .par_iter()
        .map(|market| {
            let window = analyze_window(store, market, settings, bar_limit, predictor);
            if let Err(e) = &window {
                log::warn!("❌ Scan window failed for {}: {:#}", market, e);
            }
            let alert = generate_signal(store, store, market, settings);
            MarketReport {
                market: market.clone(),
                window,
                alert,
            }
        })
        .collect();

    log::info!(
        "🔍 Scanned {} markets in {:.2}s",
        reports.len(),
        start_time.elapsed().as_secs_f64()
    );
    reports
}
