mod bar_store;
mod model_io;
mod provider;

pub use {
    bar_store::{LocalBarStore, load_bars_file},
    model_io::{ModelFile, load_model, load_predictor, save_model},
    provider::{BarProvider, PriceProvider, RangeProvider},
};
