use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use fibo_sniper::analysis::build_training_set;
use fibo_sniper::config::{ANALYSIS, PERSISTENCE};
use fibo_sniper::data::{BarProvider, LocalBarStore, ModelFile, save_model};
use fibo_sniper::domain::MarketQuery;
use fibo_sniper::models::GaussianNaiveBayes;
use fibo_sniper::utils::TimeUtils;

/// Offline trainer: bars on disk -> labeled rows -> fitted model file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct TrainArgs {
    #[arg(long, default_value = "XRPUSDT")]
    symbol: String,
    #[arg(long, default_value = "1h")]
    interval: String,
    #[arg(long, default_value = PERSISTENCE.bars.directory)]
    data_dir: PathBuf,
    #[arg(long, default_value = PERSISTENCE.model.path)]
    output: PathBuf,
}

fn main() -> Result<()> {
    // 1. Setup Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = TrainArgs::parse();
    let training = &ANALYSIS.training;
    let interval_ms = TimeUtils::string_to_interval(&args.interval)
        .with_context(|| format!("Unknown interval: {}", args.interval))?;

    log::info!("🚀 Training {} on {} {}", GaussianNaiveBayes::NAME, args.symbol, args.interval);
    log::info!("Label horizon: {} bars, bar limit: {}", training.label_horizon, training.bar_limit);

    // 2. Load bars
    let store = LocalBarStore::new(&args.data_dir);
    let market = MarketQuery::crypto(&args.symbol, "LOCAL");
    let series = store
        .fetch_bars(&market, interval_ms, training.bar_limit)
        .context("Failed to load training bars. Put a bar file in the data directory first!")?;

    // 3. Build rows, split chronologically
    let set = build_training_set(series.bars(), training.label_horizon)?;
    let (train, test) = set.train_test_split(training.holdout_fraction);
    log::info!(
        "Rows: {} train ({} rises) / {} holdout",
        train.len(),
        train.positive_count(),
        test.len()
    );

    // 4. Fit and score
    let model = GaussianNaiveBayes::fit(&train)?;
    log::info!("Train accuracy: {:.1}%", model.accuracy(&train)? * 100.0);
    if test.is_empty() {
        log::warn!("⚠ Holdout is empty. Skipping holdout score.");
    } else {
        log::info!("Holdout accuracy: {:.1}%", model.accuracy(&test)? * 100.0);
    }

    // 5. Save
    save_model(&args.output, &ModelFile::new(model, training.label_horizon))?;

    log::info!("✅ Success!");
    Ok(())
}
