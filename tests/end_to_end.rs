use std::sync::Arc;

use fibo_sniper::analysis::{AlertKind, FeatureVector, build_training_set, extract_features};
use fibo_sniper::config::{SignalSettings, TolerancePct};
use fibo_sniper::data::{ModelFile, load_predictor, save_model};
use fibo_sniper::models::GaussianNaiveBayes;
use fibo_sniper::utils::TimeUtils;
use fibo_sniper::{
    BarSeries, Classifier, DirectionalLabel, FiboError, LocalBarStore, MarketQuery, PriceBar, Predictor,
    compute_levels, detect_crossings, generate_signal,
};

struct Fixed(u8);

impl Classifier for Fixed {
    fn classify(&self, _features: &FeatureVector) -> Result<u8, FiboError> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

fn bars_from_closes(interval_ms: i64, closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PriceBar::new(i as i64 * interval_ms, c, c + 1.0, c - 1.0, c, 100.0))
        .collect()
}

#[test]
fn three_bar_series_feeds_the_predictor() {
    let bars = bars_from_closes(TimeUtils::MS_IN_H, &[10.0, 12.0, 11.0]);

    let rise = Predictor::new(Arc::new(Fixed(1)));
    let no_rise = Predictor::new(Arc::new(Fixed(0)));
    assert_eq!(rise.predict_bars(&bars), Ok(DirectionalLabel::Rise));
    assert_eq!(no_rise.predict_bars(&bars), Ok(DirectionalLabel::NoRise));

    // Same vector the predictor saw
    let fv = extract_features(&bars).unwrap();
    assert_eq!(fv.price_diff, -1.0);
}

#[test]
fn levels_and_crossings_for_a_simple_swing() {
    let levels = compute_levels(100.0, 0.0);
    let prices = levels.prices();
    assert_eq!(prices.first(), Some(&100.0));
    assert_eq!(prices.last(), Some(&0.0));

    let bars = bars_from_closes(TimeUtils::MS_IN_H, &[59.0, 62.0]);
    let events = detect_crossings(&bars, &compute_levels(100.0, 20.0)).unwrap();
    // 100 - 0.5 * 80 = 60
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level_price, 60.0);
}

#[test]
fn signal_from_bar_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalBarStore::new(dir.path());

    let hourly = BarSeries::new("XRPUSDT", TimeUtils::MS_IN_H, bars_from_closes(TimeUtils::MS_IN_H, &[0.55]))
        .unwrap();
    store.save_series(&hourly).unwrap();

    let market = MarketQuery::crypto("XRP-USDT", "BINANCE");
    let settings = SignalSettings {
        tolerance: TolerancePct::new(0.01),
        ..SignalSettings::default()
    };

    // Range is the single hourly bar: high 1.55, low -0.45, so 50% sits at 0.55
    let near = BarSeries::new("XRPUSDT", TimeUtils::MS_IN_MIN, bars_from_closes(TimeUtils::MS_IN_MIN, &[0.551]))
        .unwrap();
    store.save_series(&near).unwrap();
    let alert = generate_signal(&store, &store, &market, &settings);
    assert_eq!(alert.kind(), AlertKind::Proximate);
    assert_eq!(alert.level_label(), Some("50.0%"));
    assert!(alert.to_string().starts_with("⚠️ Close to Fibonacci level 50.0%"));

    let far = BarSeries::new("XRPUSDT", TimeUtils::MS_IN_MIN, bars_from_closes(TimeUtils::MS_IN_MIN, &[0.8]))
        .unwrap();
    store.save_series(&far).unwrap();
    let alert = generate_signal(&store, &store, &market, &settings);
    assert_eq!(alert.kind(), AlertKind::Clear);

    let unknown = MarketQuery::crypto("NONEUSDT", "BINANCE");
    let alert = generate_signal(&store, &store, &unknown, &settings);
    assert_eq!(alert.kind(), AlertKind::Unavailable);
    assert_eq!(alert.to_string(), "⚠️ Error: Could not retrieve price data.");
}

#[test]
fn trained_model_round_trips_through_disk() {
    let closes = [
        50.0, 60.0, 40.0, 70.0, 30.0, 65.0, 35.0, 55.0, 45.0, 62.0, 38.0, 58.0, 42.0, 66.0, 34.0, 61.0,
    ];
    let bars = bars_from_closes(TimeUtils::MS_IN_H, &closes);
    let set = build_training_set(&bars, 1).unwrap();
    assert!(set.positive_count() > 0 && set.positive_count() < set.len());

    let model = GaussianNaiveBayes::fit(&set).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ml").join("model.bin");
    save_model(&path, &ModelFile::new(model.clone(), 1)).unwrap();

    let predictor = load_predictor(&path).unwrap();
    let from_disk = predictor.predict_bars(&bars).unwrap();
    let in_memory = Predictor::new(Arc::new(model)).predict_bars(&bars).unwrap();
    assert_eq!(from_disk, in_memory);
}
