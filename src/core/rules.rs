use serde::{Deserialize, Serialize};
use crate::models::ExpenseCategory;

/// A single budgeting recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    InvalidIncome,
    HighHousingBurden,
    WellManagedHousing,
    HighGrocery,
    EfficientGrocery,
    HighEntertainment,
    ModerateEntertainment,
    HeavyLoan,
    ModerateLoan,
    HighUtilities,
    HighTransport,
    HighHealthcare,
    LowHealthcare,
    HighEducation,
    SavingsCritical,
    SavingsModerate,
    SavingsHealthy,
    FinancialStress,
    Balanced,
}

impl Advisory {
    /// Human-readable advice shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::InvalidIncome => "Income is zero or invalid. Please enter a valid income.",
            Advisory::HighHousingBurden => {
                "Rent exceeds 35% of income. Consider downsizing, sharing accommodation, or relocating."
            }
            Advisory::WellManagedHousing => {
                "Housing costs are well managed. This supports long-term savings."
            }
            Advisory::HighGrocery => {
                "Grocery spending is high. Monthly planning and bulk buying may reduce costs."
            }
            Advisory::EfficientGrocery => {
                "Grocery spending is efficient. Good budget control observed."
            }
            Advisory::HighEntertainment => {
                "Entertainment expenses are high. Consider limiting discretionary outings."
            }
            Advisory::ModerateEntertainment => {
                "Entertainment spending is moderate. Monitor for unnecessary expenses."
            }
            Advisory::HeavyLoan => {
                "Loan repayments are heavy. Consider refinancing or prioritizing loan closure."
            }
            Advisory::ModerateLoan => "Loan burden is moderate. Avoid taking additional debt.",
            Advisory::HighUtilities => {
                "Utility expenses are high. Energy-efficient usage may reduce bills."
            }
            Advisory::HighTransport => {
                "Transport expenses are high. Consider public transport or carpooling."
            }
            Advisory::HighHealthcare => {
                "Healthcare expenses are high. Ensure adequate insurance coverage."
            }
            Advisory::LowHealthcare => {
                "Healthcare spending is low. Maintain regular health checkups."
            }
            Advisory::HighEducation => {
                "Education expenses are significant. Plan expenses with long-term ROI in mind."
            }
            Advisory::SavingsCritical => {
                "Savings rate is very low. Immediate expense optimization is recommended."
            }
            Advisory::SavingsModerate => {
                "Savings rate is moderate. Increasing savings will improve financial security."
            }
            Advisory::SavingsHealthy => {
                "Savings rate is healthy. You are on track for long-term goals."
            }
            Advisory::FinancialStress => {
                "Total expenses exceed income. This indicates financial stress and needs urgent correction."
            }
            Advisory::Balanced => {
                "Your spending pattern is well balanced. Keep up the good financial discipline."
            }
        }
    }
}

/// Strict threshold on a ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Band {
    Above(f64),
    Below(f64),
}

impl Band {
    #[inline]
    pub fn matches(self, ratio: f64) -> bool {
        match self {
            Band::Above(threshold) => ratio > threshold,
            Band::Below(threshold) => ratio < threshold,
        }
    }
}

/// Ordered bands for one category; the first matching band wins
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: ExpenseCategory,
    pub bands: &'static [(Band, Advisory)],
}

impl CategoryRule {
    pub fn evaluate(&self, ratio: f64) -> Option<Advisory> {
        self.bands
            .iter()
            .find(|(band, _)| band.matches(ratio))
            .map(|(_, advisory)| *advisory)
    }
}

/// Category rules in evaluation order:
/// housing, food, entertainment, loans, utilities, transport, healthcare, education
pub const CATEGORY_RULES: [CategoryRule; 8] = [
    CategoryRule {
        category: ExpenseCategory::Rent,
        bands: &[
            (Band::Above(0.35), Advisory::HighHousingBurden),
            (Band::Below(0.20), Advisory::WellManagedHousing),
        ],
    },
    CategoryRule {
        category: ExpenseCategory::Groceries,
        bands: &[
            (Band::Above(0.15), Advisory::HighGrocery),
            (Band::Below(0.08), Advisory::EfficientGrocery),
        ],
    },
    CategoryRule {
        category: ExpenseCategory::Entertainment,
        bands: &[
            (Band::Above(0.10), Advisory::HighEntertainment),
            (Band::Above(0.05), Advisory::ModerateEntertainment),
        ],
    },
    CategoryRule {
        category: ExpenseCategory::Loan,
        bands: &[
            (Band::Above(0.30), Advisory::HeavyLoan),
            (Band::Above(0.20), Advisory::ModerateLoan),
        ],
    },
    CategoryRule {
        category: ExpenseCategory::Utilities,
        bands: &[(Band::Above(0.10), Advisory::HighUtilities)],
    },
    CategoryRule {
        category: ExpenseCategory::Transport,
        bands: &[(Band::Above(0.12), Advisory::HighTransport)],
    },
    CategoryRule {
        category: ExpenseCategory::Healthcare,
        bands: &[
            (Band::Above(0.10), Advisory::HighHealthcare),
            (Band::Below(0.03), Advisory::LowHealthcare),
        ],
    },
    CategoryRule {
        category: ExpenseCategory::Education,
        bands: &[(Band::Above(0.15), Advisory::HighEducation)],
    },
];

/// Savings-health classification of the savings ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavingsHealth {
    Critical,
    Moderate,
    Healthy,
}

impl SavingsHealth {
    pub fn classify(savings_ratio: f64) -> Self {
        if savings_ratio < 0.10 {
            SavingsHealth::Critical
        } else if savings_ratio < 0.20 {
            SavingsHealth::Moderate
        } else {
            SavingsHealth::Healthy
        }
    }

    pub fn advisory(&self) -> Advisory {
        match self {
            SavingsHealth::Critical => Advisory::SavingsCritical,
            SavingsHealth::Moderate => Advisory::SavingsModerate,
            SavingsHealth::Healthy => Advisory::SavingsHealthy,
        }
    }
}
