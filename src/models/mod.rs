// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{expense_breakdown, CategoryShare, ExpenseCategory, ExpenseRecord};
pub use requests::{AnalyzeRequest, HistoryQuery};
pub use responses::{AnalysisResponse, ErrorResponse, FeaturesResponse, HealthResponse, HistoryEntry, HistoryResponse};
