#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod models;
pub mod utils;

// Re-export commonly used types outside of crate (for train_model.rs and integration tests)
pub use analysis::{LevelSet, ProximityAlert, compute_levels, detect_crossings, generate_signal};
pub use config::{ANALYSIS, PERSISTENCE};
pub use data::{LocalBarStore, load_predictor};
pub use domain::{MarketQuery, PriceBar};
pub use error::FiboError;
pub use models::{BarSeries, Classifier, DirectionalLabel, Predictor};

use {
    crate::{
        config::{DEMO, SignalSettings, TolerancePct},
        data::BarProvider,
        domain::PriceRange,
        utils::TimeUtils,
    },
    anyhow::{Context, Result},
    clap::{Args, Parser, Subcommand},
    std::path::PathBuf,
};

// CLI argument parsing
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Fibonacci retracement levels, breakouts and proximity alerts", long_about = None)]
pub struct Cli {
    /// Directory holding `<SYMBOL>_<interval>.json` bar files
    #[arg(long, global = true, default_value = PERSISTENCE.bars.directory)]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the retracement levels for a high/low pair
    Levels {
        #[arg(long)]
        high: f64,
        #[arg(long)]
        low: f64,
    },
    /// List level crossings over the stored bars of one symbol
    Crossings {
        #[arg(long)]
        symbol: String,
        #[arg(long, default_value = "1h", value_parser = parse_interval)]
        interval: i64,
        #[arg(long, default_value_t = ANALYSIS.scan_bar_limit)]
        limit: usize,
    },
    /// Two-timeframe proximity alert for one market
    Signal {
        #[command(flatten)]
        market: MarketArgs,
        #[command(flatten)]
        signal: SignalArgs,
    },
    /// Directional prediction for the latest bar of one symbol
    Predict {
        #[arg(long)]
        symbol: String,
        #[arg(long, default_value = "1h", value_parser = parse_interval)]
        interval: i64,
        #[arg(long, default_value_t = ANALYSIS.training.bar_limit)]
        limit: usize,
        #[arg(long, default_value = PERSISTENCE.model.path)]
        model: PathBuf,
    },
    /// Levels, crossings, alert (and prediction, with --model) for many markets at once
    Scan {
        /// Symbols to scan; defaults to the built-in market list
        #[arg(long, value_delimiter = ',')]
        symbols: Vec<String>,
        #[arg(long, default_value = "BINANCE")]
        exchange: String,
        #[arg(long)]
        model: Option<PathBuf>,
        #[command(flatten)]
        signal: SignalArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct MarketArgs {
    #[arg(long)]
    pub symbol: String,
    #[arg(long, default_value = "BINANCE")]
    pub exchange: String,
    #[arg(long, default_value = domain::DEFAULT_SCREENER)]
    pub screener: String,
}

#[derive(Args, Debug, Clone)]
pub struct SignalArgs {
    /// Proximity band as a fraction of price (0.003 = 0.3%)
    #[arg(long, default_value_t = config::DEFAULT_TOLERANCE_RATIO)]
    pub tolerance: f64,
    /// Number of recent macro bars forming the swing high/low
    #[arg(long, default_value_t = ANALYSIS.signal.swing_bars)]
    pub swing_bars: usize,
    #[arg(long, default_value = "1h", value_parser = parse_interval)]
    pub macro_interval: i64,
    #[arg(long, default_value = "1m", value_parser = parse_interval)]
    pub micro_interval: i64,
}

impl SignalArgs {
    pub fn settings(&self) -> SignalSettings {
        SignalSettings {
            macro_interval_ms: self.macro_interval,
            micro_interval_ms: self.micro_interval,
            swing_bars: self.swing_bars,
            tolerance: TolerancePct::new(self.tolerance),
        }
    }
}

fn parse_interval(text: &str) -> std::result::Result<i64, String> {
    TimeUtils::string_to_interval(text).ok_or_else(|| format!("unknown interval '{}' (try 1m, 15m, 1h, 1d)", text))
}

/// Runs one CLI command and returns its text report.
pub fn run(args: Cli) -> Result<String> {
    let store = LocalBarStore::new(&args.data_dir);

    match args.command {
        Command::Levels { high, low } => {
            let range = PriceRange::new(high, low)?;
            Ok(engine::levels_table(&LevelSet::from_range(&range)))
        }

        Command::Crossings { symbol, interval, limit } => {
            let market = MarketQuery::crypto(&symbol, "LOCAL");
            let series = store.fetch_bars(&market, interval, limit)?;
            let range = PriceRange::from_bars(series.bars())?;
            let levels = LevelSet::from_range(&range);
            let events = detect_crossings(series.bars(), &levels)?;
            Ok(format!(
                "{} swing {}\n{}\n{} crossing(s)\n{}",
                series,
                range,
                engine::levels_table(&levels),
                events.len(),
                engine::crossings_table(&events)
            ))
        }

        Command::Signal { market, signal } => {
            let market = MarketQuery::new(&market.symbol, &market.exchange, &market.screener);
            let alert = generate_signal(&store, &store, &market, &signal.settings());
            Ok(format!("{}: {}", market, alert))
        }

        Command::Predict { symbol, interval, limit, model } => {
            let predictor = load_predictor(&model)?;
            let market = MarketQuery::crypto(&symbol, "LOCAL");
            let series = store.fetch_bars(&market, interval, limit)?;
            let label = predictor
                .predict_bars(series.bars())
                .with_context(|| format!("Prediction failed for {}", series))?;
            Ok(format!("{} ({}): {}", series, predictor.model_name(), label))
        }

        Command::Scan { symbols, exchange, model, signal } => {
            let markets: Vec<MarketQuery> = if symbols.is_empty() {
                DEMO.resources
                    .markets
                    .iter()
                    .map(|&(symbol, exchange, screener)| MarketQuery::new(symbol, exchange, screener))
                    .collect()
            } else {
                symbols.iter().map(|s| MarketQuery::crypto(s, &exchange)).collect()
            };
            let predictor = model.as_deref().map(load_predictor).transpose()?;
            let reports = engine::scan_markets(
                &store,
                &markets,
                &signal.settings(),
                ANALYSIS.scan_bar_limit,
                predictor.as_ref(),
            );
            Ok(engine::scan_table(&reports))
        }
    }
}
