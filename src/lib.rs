//! Savings Advisor - savings forecasting and budgeting recommendations
//!
//! This library provides the financial analysis engine: feature assembly for
//! the savings prediction model and the rule-based recommendation generator
//! that turns expense-to-income ratios into budgeting advice.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Analyzer, AnalysisResult, Advisory, SavingsHealth, assemble_features, generate_recommendations};
pub use crate::models::{ExpenseCategory, ExpenseRecord, AnalyzeRequest, AnalysisResponse};
