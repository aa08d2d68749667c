use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::models::{ExpenseCategory, ExpenseRecord};

/// Categories that carry their own ratio rule
///
/// Miscellaneous is deliberately absent: it counts toward the total but is
/// never judged on its own.
pub const TRACKED_CATEGORIES: [ExpenseCategory; 8] = [
    ExpenseCategory::Rent,
    ExpenseCategory::Groceries,
    ExpenseCategory::Entertainment,
    ExpenseCategory::Loan,
    ExpenseCategory::Utilities,
    ExpenseCategory::Healthcare,
    ExpenseCategory::Education,
    ExpenseCategory::Transport,
];

/// Expense-to-income ratios for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingRatios {
    #[serde(rename = "byCategory")]
    pub by_category: BTreeMap<ExpenseCategory, f64>,
    #[serde(rename = "totalExpense")]
    pub total_expense: f64,
    /// (income - total) / income, negative when overspending
    #[serde(rename = "savingsRatio")]
    pub savings_ratio: f64,
    /// total / income
    #[serde(rename = "expenseBurden")]
    pub expense_burden: f64,
}

impl SpendingRatios {
    /// Compute ratios, or `None` when income is not positive
    pub fn compute(expenses: &ExpenseRecord, income: f64) -> Option<Self> {
        if income <= 0.0 {
            return None;
        }

        let by_category = TRACKED_CATEGORIES
            .iter()
            .map(|&category| (category, expenses.get(category) / income))
            .collect();

        let total_expense = expenses.total();

        Some(Self {
            by_category,
            total_expense,
            savings_ratio: (income - total_expense) / income,
            expense_burden: total_expense / income,
        })
    }

    /// Ratio for a tracked category; untracked categories read as 0
    pub fn ratio(&self, category: ExpenseCategory) -> f64 {
        self.by_category.get(&category).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios_for_valid_income() {
        let expenses = ExpenseRecord::new()
            .with(ExpenseCategory::Rent, 20000.0)
            .with(ExpenseCategory::Groceries, 3000.0);

        let ratios = SpendingRatios::compute(&expenses, 50000.0).unwrap();

        assert_eq!(ratios.ratio(ExpenseCategory::Rent), 0.4);
        assert_eq!(ratios.ratio(ExpenseCategory::Groceries), 0.06);
        assert_eq!(ratios.ratio(ExpenseCategory::Education), 0.0);
        assert_eq!(ratios.total_expense, 23000.0);
        assert_eq!(ratios.savings_ratio, 0.54);
        assert_eq!(ratios.by_category.len(), 8);
    }

    #[test]
    fn test_no_ratios_without_income() {
        let expenses = ExpenseRecord::new().with(ExpenseCategory::Rent, 100.0);

        assert!(SpendingRatios::compute(&expenses, 0.0).is_none());
        assert!(SpendingRatios::compute(&expenses, -10.0).is_none());
    }

    #[test]
    fn test_miscellaneous_untracked_but_totalled() {
        let expenses = ExpenseRecord::new().with(ExpenseCategory::Miscellaneous, 500.0);
        let ratios = SpendingRatios::compute(&expenses, 1000.0).unwrap();

        assert!(!ratios.by_category.contains_key(&ExpenseCategory::Miscellaneous));
        assert_eq!(ratios.total_expense, 500.0);
        assert_eq!(ratios.savings_ratio, 0.5);
    }

    #[test]
    fn test_negative_savings_ratio() {
        let expenses = ExpenseRecord::new().with(ExpenseCategory::Rent, 12000.0);
        let ratios = SpendingRatios::compute(&expenses, 10000.0).unwrap();

        assert!(ratios.savings_ratio < 0.0);
        assert!((ratios.savings_ratio + 0.2).abs() < 1e-12);
        assert!((ratios.expense_burden - 1.2).abs() < 1e-12);
    }
}
