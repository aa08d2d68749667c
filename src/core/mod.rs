// Core analysis exports
pub mod analyzer;
pub mod features;
pub mod predictor;
pub mod ratios;
pub mod recommender;
pub mod rules;

pub use analyzer::{Analyzer, AnalysisResult};
pub use features::{assemble_features, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use predictor::{LinearRegressionModel, ModelHandle, PredictionError, SavingsPredictor};
pub use ratios::{SpendingRatios, TRACKED_CATEGORIES};
pub use recommender::{generate_recommendations, recommend_from_ratios};
pub use rules::{Advisory, Band, CategoryRule, SavingsHealth, CATEGORY_RULES};
