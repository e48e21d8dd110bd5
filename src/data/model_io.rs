use {
    crate::{
        analysis::FeatureVector,
        config::PERSISTENCE,
        data::bar_store::create_file_with_parents,
        models::{GaussianNaiveBayes, Predictor},
        utils::local_now_as_timestamp_ms,
    },
    anyhow::{Context, Result, bail},
    serde::{Deserialize, Serialize},
    std::{
        fs::File,
        io::{BufReader, BufWriter},
        path::Path,
        sync::Arc,
    },
};

/// Binary model artifact with the metadata needed to refuse a stale file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModelFile {
    pub version: f64,
    pub created_ms: i64,
    pub feature_names: Vec<String>,
    pub label_horizon: usize,
    pub model: GaussianNaiveBayes,
}

impl ModelFile {
    /// Stamps the current format version and feature layout
    pub fn new(model: GaussianNaiveBayes, label_horizon: usize) -> Self {
        Self {
            version: PERSISTENCE.model.version,
            created_ms: local_now_as_timestamp_ms(),
            feature_names: FeatureVector::FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            label_horizon,
            model,
        }
    }

    pub fn into_predictor(self) -> Predictor {
        Predictor::new(Arc::new(self.model))
    }
}

pub fn save_model(path: &Path, model_file: &ModelFile) -> Result<()> {
    let file = create_file_with_parents(path)?;
    let writer = BufWriter::new(file);
    bincode::serialize_into(writer, model_file)
        .with_context(|| format!("Failed to serialize model to: {}", path.display()))?;
    log::info!("✅ Model written: {}", path.display());
    Ok(())
}

pub fn load_model(path: &Path) -> Result<ModelFile> {
    let file = File::open(path).with_context(|| format!("Failed to open model: {:?}", path))?;
    let reader = BufReader::new(file);
    let model_file: ModelFile = bincode::deserialize_from(reader)
        .with_context(|| format!("Failed to deserialize model from: {:?}", path))?;

    if model_file.version != PERSISTENCE.model.version {
        bail!(
            "Model version mismatch: file v{} vs required v{}",
            model_file.version,
            PERSISTENCE.model.version
        );
    }

    // A model trained on a different feature layout would silently mispredict
    if model_file.feature_names.iter().map(String::as_str).ne(FeatureVector::FEATURE_NAMES.iter().copied()) {
        bail!(
            "Model feature mismatch: file has {:?}, expected {:?}",
            model_file.feature_names,
            FeatureVector::FEATURE_NAMES
        );
    }

    log::info!(
        "Loaded model v{} (horizon {}) from {}",
        model_file.version,
        model_file.label_horizon,
        path.display()
    );
    Ok(model_file)
}

/// Load once at startup; the returned predictor is shared read-only afterwards.
pub fn load_predictor(path: &Path) -> Result<Predictor> {
    Ok(load_model(path)?.into_predictor())
}
