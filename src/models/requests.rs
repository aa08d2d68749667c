use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::ExpenseRecord;

/// Request to analyze a household budget
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalyzeRequest {
    /// When present, the completed analysis is stored in this user's history
    #[validate(length(min = 1))]
    #[serde(default)]
    pub username: Option<String>,
    #[validate(range(min = 0.0))]
    pub income: f64,
    #[validate(custom(function = "validate_expense_amounts"))]
    #[serde(default)]
    pub expenses: ExpenseRecord,
}

/// Every amount must be a finite, non-negative number
fn validate_expense_amounts(expenses: &ExpenseRecord) -> Result<(), ValidationError> {
    for (category, amount) in expenses.iter() {
        if !amount.is_finite() || amount < 0.0 {
            let mut error = ValidationError::new("negative_amount");
            error.message = Some(format!("{} must be a non-negative number", category).into());
            return Err(error);
        }
    }
    Ok(())
}

/// Query parameters for the history endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HistoryQuery {
    #[validate(length(min = 1))]
    pub username: String,
    #[serde(default = "default_history_limit")]
    pub limit: u16,
}

fn default_history_limit() -> u16 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseCategory;

    #[test]
    fn test_valid_request() {
        let req: AnalyzeRequest = serde_json::from_str(
            r#"{"username": "asha", "income": 50000, "expenses": {"Rent": 20000}}"#,
        )
        .unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(req.expenses.get(ExpenseCategory::Rent), 20000.0);
    }

    #[test]
    fn test_expenses_optional() {
        let req: AnalyzeRequest = serde_json::from_str(r#"{"income": 0}"#).unwrap();

        assert!(req.validate().is_ok());
        assert!(req.expenses.is_empty());
        assert!(req.username.is_none());
    }

    #[test]
    fn test_negative_income_rejected() {
        let req: AnalyzeRequest = serde_json::from_str(r#"{"income": -1}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_negative_expense_rejected() {
        let req: AnalyzeRequest =
            serde_json::from_str(r#"{"income": 100, "expenses": {"Groceries": -5}}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_username_rejected() {
        let req: AnalyzeRequest = serde_json::from_str(r#"{"username": "", "income": 100}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
