mod naive_bayes;
mod ohlcv;
mod predictor;

pub use {
    naive_bayes::{ClassStats, GaussianNaiveBayes},
    ohlcv::{BarSeries, validate_bars},
    predictor::{Classifier, DirectionalLabel, Predictor},
};
