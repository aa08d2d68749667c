use serde::{Deserialize, Serialize};
use crate::models::{ExpenseCategory, ExpenseRecord};

/// Number of inputs the savings model was trained on
pub const FEATURE_COUNT: usize = 10;

/// Feature names in the positional order the savings model expects
///
/// The model is order-sensitive; never reorder these.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Income",
    "Rent",
    "Loan_Repayment",
    "Groceries",
    "Transport",
    "Utilities",
    "Healthcare",
    "Education",
    "Entertainment",
    "Miscellaneous",
];

/// Expense categories feeding feature slots 1..10
const FEATURE_CATEGORIES: [ExpenseCategory; FEATURE_COUNT - 1] = [
    ExpenseCategory::Rent,
    ExpenseCategory::Loan,
    ExpenseCategory::Groceries,
    ExpenseCategory::Transport,
    ExpenseCategory::Utilities,
    ExpenseCategory::Healthcare,
    ExpenseCategory::Education,
    ExpenseCategory::Entertainment,
    ExpenseCategory::Miscellaneous,
];

/// Fixed-order model input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn names(&self) -> &'static [&'static str; FEATURE_COUNT] {
        &FEATURE_NAMES
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Value for a named feature, if the name is part of the contract
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.values[idx])
    }
}

/// Build the model input from raw income and expenses
///
/// Missing categories become 0. Income is passed through as-is, including
/// zero, since the model tolerates it.
pub fn assemble_features(expenses: &ExpenseRecord, income: f64) -> FeatureVector {
    let mut values = [0.0; FEATURE_COUNT];
    values[0] = income;

    for (slot, category) in values[1..].iter_mut().zip(FEATURE_CATEGORIES.iter()) {
        *slot = expenses.get(*category);
    }

    FeatureVector { values }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_order_is_fixed() {
        let expenses = ExpenseRecord::new()
            .with(ExpenseCategory::Miscellaneous, 9.0)
            .with(ExpenseCategory::Rent, 1.0)
            .with(ExpenseCategory::Loan, 2.0)
            .with(ExpenseCategory::Entertainment, 8.0)
            .with(ExpenseCategory::Groceries, 3.0)
            .with(ExpenseCategory::Transport, 4.0)
            .with(ExpenseCategory::Education, 7.0)
            .with(ExpenseCategory::Utilities, 5.0)
            .with(ExpenseCategory::Healthcare, 6.0);

        let features = assemble_features(&expenses, 100.0);

        assert_eq!(
            features.values(),
            &[100.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
        );
        assert_eq!(features.names(), &FEATURE_NAMES);
    }

    #[test]
    fn test_missing_categories_default_to_zero() {
        let expenses = ExpenseRecord::new().with(ExpenseCategory::Groceries, 300.0);
        let features = assemble_features(&expenses, 5000.0);

        assert_eq!(features.get("Income"), Some(5000.0));
        assert_eq!(features.get("Groceries"), Some(300.0));
        assert_eq!(features.get("Loan_Repayment"), Some(0.0));
        assert_eq!(features.values().iter().filter(|v| **v == 0.0).count(), 8);
    }

    #[test]
    fn test_zero_income_accepted() {
        let features = assemble_features(&ExpenseRecord::new(), 0.0);
        assert_eq!(features.values().len(), FEATURE_COUNT);
        assert_eq!(features.get("Income"), Some(0.0));
    }

    #[test]
    fn test_unknown_feature_name() {
        let features = assemble_features(&ExpenseRecord::new(), 1.0);
        assert_eq!(features.get("Loan"), None);
    }
}
