use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use crate::core::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};

/// Errors raised while loading or evaluating the savings model
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid model file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Model is missing a coefficient for feature '{0}'")]
    MissingCoefficient(String),

    #[error("Model has a coefficient for unknown feature '{0}'")]
    UnknownFeature(String),

    #[error("Model produced a non-finite prediction: {0}")]
    NonFinite(f64),

    #[error("No model source configured")]
    NotConfigured,

    #[error("Model load task failed: {0}")]
    LoadTask(#[from] tokio::task::JoinError),
}

/// Interface for savings prediction models
///
/// Implementations must be safe to share across workers; they are never
/// mutated after load.
pub trait SavingsPredictor: Send + Sync {
    /// Predict monthly savings for the given feature vector
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError>;

    fn name(&self) -> &str;

    fn version(&self) -> &str;
}

/// On-disk layout of a linear model
#[derive(Debug, Deserialize)]
struct ModelFile {
    name: String,
    #[serde(default = "default_model_version")]
    version: String,
    intercept: f64,
    coefficients: BTreeMap<String, f64>,
}

fn default_model_version() -> String { "1".to_string() }

/// Ordinary least squares regression over the fixed feature vector
#[derive(Debug, Clone)]
pub struct LinearRegressionModel {
    name: String,
    version: String,
    intercept: f64,
    coefficients: [f64; FEATURE_COUNT],
}

impl LinearRegressionModel {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        intercept: f64,
        coefficients: [f64; FEATURE_COUNT],
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            intercept,
            coefficients,
        }
    }

    /// Load a model from a TOML coefficient file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PredictionError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let model = Self::from_toml(&raw)?;

        tracing::info!(
            "Loaded savings model {} v{} from {}",
            model.name,
            model.version,
            path.as_ref().display()
        );

        Ok(model)
    }

    /// Parse a model and align its coefficients to the feature order
    pub fn from_toml(raw: &str) -> Result<Self, PredictionError> {
        let file: ModelFile = toml::from_str(raw)?;

        if let Some(unknown) = file
            .coefficients
            .keys()
            .find(|name| !FEATURE_NAMES.contains(&name.as_str()))
        {
            return Err(PredictionError::UnknownFeature(unknown.clone()));
        }

        let mut coefficients = [0.0; FEATURE_COUNT];
        for (slot, name) in coefficients.iter_mut().zip(FEATURE_NAMES.iter()) {
            *slot = *file
                .coefficients
                .get(*name)
                .ok_or_else(|| PredictionError::MissingCoefficient(name.to_string()))?;
        }

        Ok(Self::new(file.name, file.version, file.intercept, coefficients))
    }
}

impl SavingsPredictor for LinearRegressionModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let prediction = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features.values().iter())
                .map(|(coef, value)| coef * value)
                .sum::<f64>();

        if !prediction.is_finite() {
            return Err(PredictionError::NonFinite(prediction));
        }

        Ok(prediction)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }
}

/// Owned, lazily-loaded handle to the process's savings model
///
/// The model file is read on the first `get` and shared afterwards.
pub struct ModelHandle {
    path: Option<PathBuf>,
    model: OnceLock<Arc<dyn SavingsPredictor>>,
}

impl ModelHandle {
    /// Handle that loads a linear model from `path` on first use
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: Some(path.into()),
            model: OnceLock::new(),
        }
    }

    /// Handle around an already-built predictor
    pub fn preloaded(model: Arc<dyn SavingsPredictor>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(model);
        Self { path: None, model: cell }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    /// Return the model, loading it if this is the first call
    pub fn get(&self) -> Result<Arc<dyn SavingsPredictor>, PredictionError> {
        if let Some(model) = self.model.get() {
            return Ok(Arc::clone(model));
        }

        let path = self.path.as_ref().ok_or(PredictionError::NotConfigured)?;
        let loaded: Arc<dyn SavingsPredictor> = Arc::new(LinearRegressionModel::load(path)?);

        // Concurrent first calls may both load; the first stored copy wins.
        Ok(Arc::clone(self.model.get_or_init(|| loaded)))
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("path", &self.path)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
