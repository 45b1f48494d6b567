//! Chart-ready data builders
//!
//! Formats the expense ledger and savings projection into plain records a
//! frontend charting library can render directly. No drawing happens here.

use crate::config::ProjectionConfig;
use crate::expenses::ExpenseLedger;
use crate::models::ExpenseCategory;
use serde::{Deserialize, Serialize};

/// One slice of the expense breakdown chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseSlice {
    pub category: ExpenseCategory,
    pub label: String,
    pub amount: f64,
    pub percentage: f64,
}

/// Expense breakdown slices, largest first. Empty ledger yields no slices.
pub fn expense_breakdown(ledger: &ExpenseLedger) -> Vec<ExpenseSlice> {
    let total = ledger.total();
    if total <= 0.0 {
        return Vec::new();
    }

    ledger
        .sorted_desc()
        .into_iter()
        .map(|(category, amount)| ExpenseSlice {
            category,
            label: category.to_string(),
            amount,
            percentage: amount / total * 100.0,
        })
        .collect()
}

/// One point of the savings growth projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub month: u32,
    pub balance: f64,
}

/// Project savings growth: the current balance compounds monthly while a
/// fixed contribution is added each month. Contributions at or below zero
/// still project the balance alone.
pub fn savings_projection(
    starting_balance: f64,
    monthly_contribution: f64,
    config: &ProjectionConfig,
) -> Vec<ProjectionPoint> {
    let monthly_rate = config.annual_return / 12.0;
    let contribution = monthly_contribution.max(0.0);

    (0..=config.horizon_months)
        .map(|month| {
            let m = month as f64;
            let balance = if monthly_rate > 0.0 {
                let growth = (1.0 + monthly_rate).powf(m);
                starting_balance * growth + contribution * ((growth - 1.0) / monthly_rate)
            } else {
                starting_balance + contribution * m
            };
            ProjectionPoint { month, balance }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_breakdown_sorted() {
        let mut ledger = ExpenseLedger::new();
        ledger.add(ExpenseCategory::Food, 600.0).unwrap();
        ledger.add(ExpenseCategory::Housing, 1400.0).unwrap();

        let slices = expense_breakdown(&ledger);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].category, ExpenseCategory::Housing);
        assert!((slices[0].percentage - 70.0).abs() < 1e-9);
        assert!((slices[1].percentage - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_breakdown() {
        assert!(expense_breakdown(&ExpenseLedger::new()).is_empty());
    }

    #[test]
    fn test_projection_starts_at_balance_and_grows() {
        let config = ProjectionConfig::default();
        let points = savings_projection(5000.0, 500.0, &config);

        assert_eq!(points.len(), config.horizon_months as usize + 1);
        assert!((points[0].balance - 5000.0).abs() < 1e-9);

        // Monotonically increasing with positive return and contributions
        for pair in points.windows(2) {
            assert!(pair[1].balance > pair[0].balance);
        }
    }

    #[test]
    fn test_projection_zero_rate() {
        let config = ProjectionConfig {
            annual_return: 0.0,
            horizon_months: 12,
        };
        let points = savings_projection(1000.0, 100.0, &config);
        assert!((points[12].balance - 2200.0).abs() < 1e-9);
    }
}
