use serde::{Deserialize, Serialize};

use crate::analysis::fibonacci::{FiboLevel, LevelSet};
use crate::config::{SignalSettings, TolerancePct};
use crate::data::{PriceProvider, RangeProvider};
use crate::domain::MarketQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    Proximate,
    Clear,
    Unavailable,
}

/// Why a signal could not be produced. Carries the upstream error text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnavailableReason {
    RangeFetchFailed(String),
    PriceFetchFailed(String),
}

impl std::fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RangeFetchFailed(e) => write!(f, "range fetch failed: {}", e),
            Self::PriceFetchFailed(e) => write!(f, "price fetch failed: {}", e),
        }
    }
}

/// The single alert returned by one signal run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProximityAlert {
    /// Price sits inside the tolerance band of `level` (first match in ratio order)
    Proximate { level: FiboLevel, current_price: f64 },
    /// No level is within tolerance
    Clear { current_price: f64 },
    Unavailable { reason: UnavailableReason },
}

impl ProximityAlert {
    pub fn kind(&self) -> AlertKind {
        match self {
            Self::Proximate { .. } => AlertKind::Proximate,
            Self::Clear { .. } => AlertKind::Clear,
            Self::Unavailable { .. } => AlertKind::Unavailable,
        }
    }

    pub fn level_label(&self) -> Option<&'static str> {
        match self {
            Self::Proximate { level, .. } => Some(level.ratio.label()),
            _ => None,
        }
    }

    pub fn level_price(&self) -> Option<f64> {
        match self {
            Self::Proximate { level, .. } => Some(level.price),
            _ => None,
        }
    }

    pub fn current_price(&self) -> Option<f64> {
        match self {
            Self::Proximate { current_price, .. } | Self::Clear { current_price } => Some(*current_price),
            Self::Unavailable { .. } => None,
        }
    }
}

impl std::fmt::Display for ProximityAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Proximate { level, current_price } => write!(
                f,
                "⚠️ Close to Fibonacci level {} at {:.4} (Current: {:.4})",
                level.ratio, level.price, current_price
            ),
            Self::Clear { current_price } => write!(
                f,
                "✅ No significant Fibonacci level nearby. (Current: {:.4})",
                current_price
            ),
            Self::Unavailable { reason: UnavailableReason::RangeFetchFailed(_) } => {
                write!(f, "⚠️ Error: Could not retrieve price data.")
            }
            Self::Unavailable { reason } => write!(f, "⚠️ Error analyzing signal: {}", reason),
        }
    }
}

/// First level (in ratio-ascending order) with `|price - level| < tolerance * price`.
/// Deliberately first-match, not closest-match.
pub fn find_proximate(levels: &LevelSet, current_price: f64, tolerance: TolerancePct) -> Option<FiboLevel> {
    let band = tolerance.band(current_price);
    levels
        .iter()
        .find(|level| (current_price - level.price).abs() < band)
        .copied()
}

/// Two-timeframe proximity check.
///
/// 1. Macro: swing range at `settings.macro_interval_ms` -> levels.
/// 2. Micro: current price at `settings.micro_interval_ms`.
///
/// Provider failures never escape as errors; they come back as `Unavailable`.
pub fn generate_signal<R, P>(
    range_provider: &R,
    price_provider: &P,
    market: &MarketQuery,
    settings: &SignalSettings,
) -> ProximityAlert
where
    R: RangeProvider + ?Sized,
    P: PriceProvider + ?Sized,
{
    // 1. Get Macro Levels (Swing High/Low)
    let range = match range_provider.price_range(market, settings.macro_interval_ms, settings.swing_bars) {
        Ok(range) => range,
        Err(e) => {
            log::warn!("❌ Error fetching price range for {}: {:#}", market, e);
            return ProximityAlert::Unavailable {
                reason: UnavailableReason::RangeFetchFailed(format!("{:#}", e)),
            };
        }
    };
    let levels = LevelSet::from_range(&range);

    // 2. Get Current Micro Price
    let current_price = match price_provider.current_price(market, settings.micro_interval_ms) {
        Ok(price) if price.is_finite() => price,
        Ok(price) => {
            log::warn!("Non-finite current price {} for {}", price, market);
            return ProximityAlert::Unavailable {
                reason: UnavailableReason::PriceFetchFailed(format!("non-finite price {}", price)),
            };
        }
        Err(e) => {
            log::warn!("❌ Error fetching current price for {}: {:#}", market, e);
            return ProximityAlert::Unavailable {
                reason: UnavailableReason::PriceFetchFailed(format!("{:#}", e)),
            };
        }
    };

    // 3. Check for Proximity
    let alert = match find_proximate(&levels, current_price, settings.tolerance) {
        Some(level) => ProximityAlert::Proximate { level, current_price },
        None => ProximityAlert::Clear { current_price },
    };

    log::info!(
        "{}: range {} tolerance {} -> {:?}",
        market,
        range,
        settings.tolerance,
        alert.kind()
    );

    alert
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fibonacci::FiboRatio;
    use crate::domain::PriceRange;
    use anyhow::{Result, anyhow};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedRange(Option<(f64, f64)>);

    impl RangeProvider for FixedRange {
        fn price_range(&self, _market: &MarketQuery, _interval_ms: i64, _swing_bars: usize) -> Result<PriceRange> {
            let (high, low) = self.0.ok_or_else(|| anyhow!("upstream timeout"))?;
            Ok(PriceRange::new(high, low)?)
        }
    }

    struct FixedPrice {
        price: Option<f64>,
        calls: AtomicUsize,
    }

    impl FixedPrice {
        fn new(price: Option<f64>) -> Self {
            Self { price, calls: AtomicUsize::new(0) }
        }
    }

    impl PriceProvider for FixedPrice {
        fn current_price(&self, _market: &MarketQuery, _interval_ms: i64) -> Result<f64> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.price.ok_or_else(|| anyhow!("no ticks"))
        }
    }

    fn market() -> MarketQuery {
        MarketQuery::crypto("XRPUSDT", "BINANCE")
    }

    #[test]
    fn test_first_match_wins_when_two_levels_qualify() {
        let levels = LevelSet::from_levels(vec![
            FiboLevel { ratio: FiboRatio::R0, price: 100.0 },
            FiboLevel { ratio: FiboRatio::R236, price: 100.2 },
        ]);
        // Band is ~0.3, both levels are ~0.1 away; A comes first in ratio order
        let hit = find_proximate(&levels, 100.1, TolerancePct::new(0.003)).unwrap();
        assert_eq!(hit.ratio, FiboRatio::R0);
        assert_eq!(hit.price, 100.0);
    }

    #[test]
    fn test_band_is_strict() {
        let levels = LevelSet::from_levels(vec![FiboLevel { ratio: FiboRatio::R500, price: 50.0 }]);
        // Band at 100 is exactly 50.0, and |100 - 50| is not < 50
        assert!(find_proximate(&levels, 100.0, TolerancePct::new(0.5)).is_none());
        assert!(find_proximate(&levels, 99.0, TolerancePct::new(0.5)).is_some());
    }

    #[test]
    fn test_signal_proximate() {
        let settings = SignalSettings::default();
        // Levels 100 -> 0, golden ratio at 38.2
        let alert = generate_signal(&FixedRange(Some((100.0, 0.0))), &FixedPrice::new(Some(38.25)), &market(), &settings);

        assert_eq!(alert.kind(), AlertKind::Proximate);
        assert_eq!(alert.level_label(), Some("61.8%"));
        assert_eq!(alert.current_price(), Some(38.25));
        assert!(alert.to_string().starts_with("⚠️ Close to Fibonacci level 61.8% at 38.2000"));
    }

    #[test]
    fn test_signal_clear() {
        let settings = SignalSettings::default();
        let alert = generate_signal(&FixedRange(Some((100.0, 0.0))), &FixedPrice::new(Some(45.0)), &market(), &settings);

        assert_eq!(alert, ProximityAlert::Clear { current_price: 45.0 });
        assert_eq!(alert.to_string(), "✅ No significant Fibonacci level nearby. (Current: 45.0000)");
    }

    #[test]
    fn test_range_failure_is_unavailable_and_skips_micro_stage() {
        let price = FixedPrice::new(Some(45.0));
        let alert = generate_signal(&FixedRange(None), &price, &market(), &SignalSettings::default());

        assert_eq!(alert.kind(), AlertKind::Unavailable);
        assert_eq!(alert.current_price(), None);
        assert_eq!(alert.to_string(), "⚠️ Error: Could not retrieve price data.");
        assert_eq!(price.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_inverted_range_is_unavailable() {
        let alert = generate_signal(
            &FixedRange(Some((1.0, 2.0))),
            &FixedPrice::new(Some(1.5)),
            &market(),
            &SignalSettings::default(),
        );
        assert!(matches!(
            alert,
            ProximityAlert::Unavailable { reason: UnavailableReason::RangeFetchFailed(_) }
        ));
    }

    #[test]
    fn test_price_failure_is_unavailable() {
        let alert = generate_signal(&FixedRange(Some((100.0, 0.0))), &FixedPrice::new(None), &market(), &SignalSettings::default());
        assert!(matches!(
            alert,
            ProximityAlert::Unavailable { reason: UnavailableReason::PriceFetchFailed(_) }
        ));

        let nan = generate_signal(
            &FixedRange(Some((100.0, 0.0))),
            &FixedPrice::new(Some(f64::NAN)),
            &market(),
            &SignalSettings::default(),
        );
        assert_eq!(nan.kind(), AlertKind::Unavailable);
    }
}
