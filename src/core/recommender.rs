use crate::models::ExpenseRecord;
use crate::core::{
    ratios::SpendingRatios,
    rules::{Advisory, SavingsHealth, CATEGORY_RULES},
};

/// Generate ordered budgeting advice for a household
///
/// Evaluation order:
/// 1. Category rules (housing, food, entertainment, loans, utilities,
///    transport, healthcare, education), at most one advisory per category
/// 2. Savings health, always exactly one advisory
/// 3. Overall stress when expenses exceed income
///
/// A non-positive income short-circuits to a single `InvalidIncome`
/// advisory without computing any ratio.
pub fn generate_recommendations(expenses: &ExpenseRecord, income: f64) -> Vec<Advisory> {
    match SpendingRatios::compute(expenses, income) {
        Some(ratios) => recommend_from_ratios(&ratios, income),
        None => vec![Advisory::InvalidIncome],
    }
}

/// Rule evaluation over precomputed ratios
pub fn recommend_from_ratios(ratios: &SpendingRatios, income: f64) -> Vec<Advisory> {
    let mut advisories: Vec<Advisory> = CATEGORY_RULES
        .iter()
        .filter_map(|rule| rule.evaluate(ratios.ratio(rule.category)))
        .collect();

    advisories.push(SavingsHealth::classify(ratios.savings_ratio).advisory());

    if ratios.total_expense > income {
        advisories.push(Advisory::FinancialStress);
    }

    // Unreachable while savings health always contributes an entry
    if advisories.is_empty() {
        advisories.push(Advisory::Balanced);
    }

    advisories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseCategory;

    /// Expenses that sit in every category's silent zone for income 1000
    fn silent_expenses() -> ExpenseRecord {
        ExpenseRecord::new()
            .with(ExpenseCategory::Rent, 250.0)
            .with(ExpenseCategory::Groceries, 100.0)
            .with(ExpenseCategory::Healthcare, 50.0)
    }

    #[test]
    fn test_invalid_income_short_circuits() {
        let expenses = ExpenseRecord::new().with(ExpenseCategory::Rent, 500.0);

        assert_eq!(generate_recommendations(&expenses, 0.0), vec![Advisory::InvalidIncome]);
        assert_eq!(generate_recommendations(&expenses, -100.0), vec![Advisory::InvalidIncome]);
    }

    #[test]
    fn test_silent_categories_only_report_savings() {
        let advice = generate_recommendations(&silent_expenses(), 1000.0);
        assert_eq!(advice, vec![Advisory::SavingsHealthy]);
    }

    #[test]
    fn test_high_rent_and_efficient_groceries() {
        let expenses = ExpenseRecord::new()
            .with(ExpenseCategory::Rent, 20000.0)
            .with(ExpenseCategory::Groceries, 3000.0);

        let advice = generate_recommendations(&expenses, 50000.0);

        assert_eq!(
            advice,
            vec![
                Advisory::HighHousingBurden,
                Advisory::EfficientGrocery,
                Advisory::LowHealthcare,
                Advisory::SavingsHealthy,
            ]
        );
    }

    #[test]
    fn test_overspending_adds_stress_after_savings_health() {
        let expenses = silent_expenses().with(ExpenseCategory::Miscellaneous, 800.0);

        let advice = generate_recommendations(&expenses, 1000.0);

        assert_eq!(advice, vec![Advisory::SavingsCritical, Advisory::FinancialStress]);
    }

    #[test]
    fn test_expenses_equal_to_income_are_not_stress() {
        let expenses = silent_expenses().with(ExpenseCategory::Miscellaneous, 600.0);

        let advice = generate_recommendations(&expenses, 1000.0);

        assert_eq!(advice, vec![Advisory::SavingsCritical]);
    }

    #[test]
    fn test_moderate_savings() {
        let expenses = silent_expenses().with(ExpenseCategory::Miscellaneous, 450.0);

        let advice = generate_recommendations(&expenses, 1000.0);

        assert_eq!(advice, vec![Advisory::SavingsModerate]);
    }

    #[test]
    fn test_every_category_fires_in_order() {
        let expenses = ExpenseRecord::new()
            .with(ExpenseCategory::Rent, 400.0)
            .with(ExpenseCategory::Groceries, 200.0)
            .with(ExpenseCategory::Entertainment, 150.0)
            .with(ExpenseCategory::Loan, 350.0)
            .with(ExpenseCategory::Utilities, 110.0)
            .with(ExpenseCategory::Transport, 130.0)
            .with(ExpenseCategory::Healthcare, 120.0)
            .with(ExpenseCategory::Education, 160.0);

        let advice = generate_recommendations(&expenses, 1000.0);

        assert_eq!(
            advice,
            vec![
                Advisory::HighHousingBurden,
                Advisory::HighGrocery,
                Advisory::HighEntertainment,
                Advisory::HeavyLoan,
                Advisory::HighUtilities,
                Advisory::HighTransport,
                Advisory::HighHealthcare,
                Advisory::HighEducation,
                Advisory::SavingsCritical,
                Advisory::FinancialStress,
            ]
        );
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        let expenses = ExpenseRecord::new()
            .with(ExpenseCategory::Entertainment, 70.0)
            .with(ExpenseCategory::Loan, 250.0);

        let first = generate_recommendations(&expenses, 1000.0);
        let second = generate_recommendations(&expenses, 1000.0);

        assert_eq!(first, second);
        assert!(first.contains(&Advisory::ModerateEntertainment));
        assert!(first.contains(&Advisory::ModerateLoan));
    }
}
