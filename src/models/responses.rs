use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::core::{AnalysisResult, Advisory, SavingsHealth, SpendingRatios};
use crate::models::domain::{CategoryShare, ExpenseCategory};

/// Response for the analyze endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(rename = "analysisId")]
    pub analysis_id: uuid::Uuid,
    pub income: f64,
    #[serde(rename = "predictedSavings")]
    pub predicted_savings: f64,
    #[serde(rename = "totalExpense")]
    pub total_expense: f64,
    /// Advice text in evaluation order
    pub recommendations: Vec<String>,
    /// Machine-readable kinds, parallel to `recommendations`
    pub advisories: Vec<Advisory>,
    #[serde(rename = "savingsHealth")]
    pub savings_health: Option<SavingsHealth>,
    pub ratios: Option<SpendingRatios>,
    pub breakdown: Vec<CategoryShare>,
}

impl AnalysisResponse {
    pub fn from_result(analysis_id: uuid::Uuid, result: AnalysisResult) -> Self {
        Self {
            analysis_id,
            income: result.income,
            predicted_savings: result.predicted_savings,
            total_expense: result.total_expense,
            recommendations: result
                .advisories
                .iter()
                .map(|advisory| advisory.message().to_string())
                .collect(),
            advisories: result.advisories,
            savings_health: result.savings_health,
            ratios: result.ratios,
            breakdown: result.breakdown,
        }
    }
}

/// Response for the features endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesResponse {
    pub names: Vec<String>,
    pub values: Vec<f64>,
}

/// One stored analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: uuid::Uuid,
    pub username: String,
    pub income: f64,
    #[serde(rename = "totalExpense")]
    pub total_expense: f64,
    #[serde(rename = "predictedSavings")]
    pub predicted_savings: f64,
    #[serde(rename = "expenseBurden")]
    pub expense_burden: Option<f64>,
    pub ratios: BTreeMap<ExpenseCategory, f64>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Response for the history endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub username: String,
    pub entries: Vec<HistoryEntry>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(rename = "modelLoaded")]
    pub model_loaded: bool,
    #[serde(rename = "historyEnabled")]
    pub history_enabled: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
