use std::sync::Arc;
use crate::models::{expense_breakdown, CategoryShare, ExpenseRecord};
use crate::core::{
    features::{assemble_features, FeatureVector},
    predictor::{ModelHandle, PredictionError},
    ratios::SpendingRatios,
    recommender::recommend_from_ratios,
    rules::{Advisory, SavingsHealth},
};

/// Result of one financial analysis
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub income: f64,
    /// Model output floored at 0
    pub predicted_savings: f64,
    pub total_expense: f64,
    pub features: FeatureVector,
    pub advisories: Vec<Advisory>,
    /// `None` when income is not positive
    pub savings_health: Option<SavingsHealth>,
    pub ratios: Option<SpendingRatios>,
    pub breakdown: Vec<CategoryShare>,
}

/// Main analysis orchestrator
///
/// # Pipeline Stages
/// 1. Feature assembly and savings prediction
/// 2. Ratio computation
/// 3. Rule evaluation
/// 4. Expense breakdown
#[derive(Debug, Clone)]
pub struct Analyzer {
    model: Arc<ModelHandle>,
}

impl Analyzer {
    pub fn new(model: Arc<ModelHandle>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Load the model off the async workers if it is not in memory yet
    pub async fn ensure_model_loaded(&self) -> Result<(), PredictionError> {
        if self.model.is_loaded() {
            return Ok(());
        }

        let handle = Arc::clone(&self.model);
        tokio::task::spawn_blocking(move || handle.get().map(|_| ())).await?
    }

    /// Run the full analysis for one household
    ///
    /// Prediction failures propagate; everything else is total over
    /// non-negative input.
    pub fn analyze(
        &self,
        expenses: &ExpenseRecord,
        income: f64,
    ) -> Result<AnalysisResult, PredictionError> {
        let features = assemble_features(expenses, income);
        let raw_prediction = self.model.get()?.predict(&features)?;

        if raw_prediction < 0.0 {
            tracing::debug!("Clamping negative savings prediction {:.2} to 0", raw_prediction);
        }
        let predicted_savings = raw_prediction.max(0.0);

        let ratios = SpendingRatios::compute(expenses, income);
        let (advisories, savings_health) = match &ratios {
            Some(ratios) => (
                recommend_from_ratios(ratios, income),
                Some(SavingsHealth::classify(ratios.savings_ratio)),
            ),
            None => (vec![Advisory::InvalidIncome], None),
        };

        Ok(AnalysisResult {
            income,
            predicted_savings,
            total_expense: expenses.total(),
            features,
            advisories,
            savings_health,
            ratios,
            breakdown: expense_breakdown(expenses),
        })
    }
}
