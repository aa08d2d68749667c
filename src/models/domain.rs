use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Expense categories accepted by the analysis engine
///
/// The set is closed. Declaration order is the canonical display order and
/// drives the `Ord` impl, so maps keyed by category iterate in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Rent,
    #[serde(alias = "Loan_Repayment")]
    Loan,
    Groceries,
    Transport,
    Utilities,
    Healthcare,
    Education,
    Entertainment,
    Miscellaneous,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 9] = [
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

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Rent => "Rent",
            ExpenseCategory::Loan => "Loan",
            ExpenseCategory::Groceries => "Groceries",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Healthcare => "Healthcare",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Miscellaneous => "Miscellaneous",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monthly expenses keyed by category
///
/// Categories that were never supplied read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseRecord {
    amounts: BTreeMap<ExpenseCategory, f64>,
}

impl ExpenseRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for tests and fixtures
    pub fn with(mut self, category: ExpenseCategory, amount: f64) -> Self {
        self.set(category, amount);
        self
    }

    pub fn set(&mut self, category: ExpenseCategory, amount: f64) {
        self.amounts.insert(category, amount);
    }

    /// Amount for a category, defaulting to 0 when absent
    pub fn get(&self, category: ExpenseCategory) -> f64 {
        self.amounts.get(&category).copied().unwrap_or(0.0)
    }

    /// Sum of every supplied amount, Miscellaneous included
    pub fn total(&self) -> f64 {
        self.amounts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExpenseCategory, f64)> + '_ {
        self.amounts.iter().map(|(category, amount)| (*category, *amount))
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

impl FromIterator<(ExpenseCategory, f64)> for ExpenseRecord {
    fn from_iter<I: IntoIterator<Item = (ExpenseCategory, f64)>>(iter: I) -> Self {
        Self {
            amounts: iter.into_iter().collect(),
        }
    }
}

/// One slice of the expense distribution chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: ExpenseCategory,
    pub amount: f64,
    #[serde(rename = "sharePercent")]
    pub share_percent: f64,
}

/// Per-category breakdown over all nine categories, in canonical order
pub fn expense_breakdown(expenses: &ExpenseRecord) -> Vec<CategoryShare> {
    let total = expenses.total();

    ExpenseCategory::ALL
        .iter()
        .map(|&category| {
            let amount = expenses.get(category);
            let share_percent = if total > 0.0 { amount / total * 100.0 } else { 0.0 };

            CategoryShare {
                category,
                amount,
                share_percent,
            }
        })
        .collect()
}
