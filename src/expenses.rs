//! Expense ledger and spending analysis
//!
//! Per-category monthly amounts with categorical aggregation, free-text
//! auto-categorization, and pattern analysis with recommendations.

use crate::error::AdvisorError;
use crate::models::ExpenseCategory;
use crate::Result;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

lazy_static! {
    /// Keyword hints for categorizing free-text expense descriptions.
    /// Checked in order; the first matching category wins.
    static ref CATEGORY_KEYWORDS: Vec<(ExpenseCategory, &'static [&'static str])> = vec![
        (
            ExpenseCategory::Housing,
            &["rent", "mortgage", "utilities", "internet", "phone"][..],
        ),
        (
            ExpenseCategory::Food,
            &["grocery", "restaurant", "food", "dining", "lunch", "dinner"][..],
        ),
        (
            ExpenseCategory::Transportation,
            &["gas", "uber", "taxi", "bus", "train", "car payment"][..],
        ),
        (
            ExpenseCategory::Entertainment,
            &["movie", "netflix", "spotify", "game", "concert"][..],
        ),
        (
            ExpenseCategory::Healthcare,
            &["doctor", "medicine", "hospital", "dental", "pharmacy"][..],
        ),
        (ExpenseCategory::Insurance, &["insurance", "premium"][..]),
        (
            ExpenseCategory::Shopping,
            &["amazon", "clothes", "shopping", "store"][..],
        ),
        (
            ExpenseCategory::Education,
            &["tuition", "textbook", "course", "school"][..],
        ),
        (
            ExpenseCategory::DebtPayments,
            &["loan payment", "credit card payment", "debt"][..],
        ),
    ];
}

/// Categorize an expense from its free-text description
pub fn categorize(description: &str) -> ExpenseCategory {
    let lowered = description.to_lowercase();

    for (category, keywords) in CATEGORY_KEYWORDS.iter() {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return *category;
        }
    }

    ExpenseCategory::Other
}

//
// ================= Ledger =================
//

/// Per-category monthly expense amounts.
/// BTreeMap keeps iteration order deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseLedger {
    amounts: BTreeMap<ExpenseCategory, f64>,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount to a category, accumulating into any existing total
    pub fn add(&mut self, category: ExpenseCategory, amount: f64) -> Result<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(AdvisorError::InvalidInput(format!(
                "expense amount must be a non-negative number, got {}",
                amount
            )));
        }

        *self.amounts.entry(category).or_insert(0.0) += amount;
        Ok(())
    }

    /// Add an amount categorized from a free-text description,
    /// returning the category it landed in
    pub fn record(&mut self, description: &str, amount: f64) -> Result<ExpenseCategory> {
        let category = categorize(description);
        self.add(category, amount)?;
        Ok(category)
    }

    pub fn clear(&mut self) {
        self.amounts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.amounts.values().sum()
    }

    pub fn amount(&self, category: ExpenseCategory) -> f64 {
        self.amounts.get(&category).copied().unwrap_or(0.0)
    }

    /// Iterate over categories with recorded amounts
    pub fn iter(&self) -> impl Iterator<Item = (ExpenseCategory, f64)> + '_ {
        self.amounts.iter().map(|(c, a)| (*c, *a))
    }

    /// Categories sorted by amount, largest first
    pub fn sorted_desc(&self) -> Vec<(ExpenseCategory, f64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        entries
    }
}

//
// ================= Analysis =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingAnalysis {
    pub total: f64,
    pub highest_category: ExpenseCategory,
    pub lowest_category: ExpenseCategory,
    /// (category, share of total in percent), sorted largest first
    pub category_percentages: Vec<(ExpenseCategory, f64)>,
    pub recommendations: Vec<String>,
}

/// Analyze spending patterns. Returns None for an empty ledger.
pub fn analyze(ledger: &ExpenseLedger) -> Option<SpendingAnalysis> {
    if ledger.is_empty() {
        return None;
    }

    let total = ledger.total();
    let sorted = ledger.sorted_desc();

    let highest_category = sorted.first().map(|(c, _)| *c)?;
    let lowest_category = sorted.last().map(|(c, _)| *c)?;

    let category_percentages: Vec<(ExpenseCategory, f64)> = sorted
        .iter()
        .map(|(c, a)| (*c, if total > 0.0 { a / total * 100.0 } else { 0.0 }))
        .collect();

    let mut recommendations = Vec::new();
    for (category, percentage) in &category_percentages {
        match category {
            ExpenseCategory::Entertainment | ExpenseCategory::Shopping
                if *percentage > 20.0 =>
            {
                recommendations.push(format!(
                    "Consider reducing {} spending (currently {:.1}% of expenses)",
                    category, percentage
                ));
            }
            ExpenseCategory::Housing if *percentage > 30.0 => {
                recommendations.push(format!(
                    "Housing costs are high ({:.1}% of expenses). Consider options to reduce.",
                    percentage
                ));
            }
            _ => {}
        }
    }

    Some(SpendingAnalysis {
        total,
        highest_category,
        lowest_category,
        category_percentages,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_descriptions() {
        assert_eq!(categorize("monthly rent"), ExpenseCategory::Housing);
        assert_eq!(categorize("Netflix subscription"), ExpenseCategory::Entertainment);
        assert_eq!(categorize("grocery run"), ExpenseCategory::Food);
        assert_eq!(categorize("mystery charge"), ExpenseCategory::Other);
    }

    #[test]
    fn test_ledger_accumulates() {
        let mut ledger = ExpenseLedger::new();
        ledger.add(ExpenseCategory::Food, 200.0).unwrap();
        ledger.add(ExpenseCategory::Food, 100.0).unwrap();
        ledger.add(ExpenseCategory::Housing, 1200.0).unwrap();

        assert_eq!(ledger.amount(ExpenseCategory::Food), 300.0);
        assert_eq!(ledger.total(), 1500.0);
    }

    #[test]
    fn test_ledger_rejects_bad_amounts() {
        let mut ledger = ExpenseLedger::new();
        assert!(ledger.add(ExpenseCategory::Food, -5.0).is_err());
        assert!(ledger.add(ExpenseCategory::Food, f64::NAN).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_analysis() {
        let mut ledger = ExpenseLedger::new();
        ledger.add(ExpenseCategory::Housing, 1500.0).unwrap();
        ledger.add(ExpenseCategory::Shopping, 900.0).unwrap();
        ledger.add(ExpenseCategory::Food, 600.0).unwrap();

        let analysis = analyze(&ledger).unwrap();
        assert_eq!(analysis.highest_category, ExpenseCategory::Housing);
        assert_eq!(analysis.lowest_category, ExpenseCategory::Food);
        assert_eq!(analysis.total, 3000.0);

        // Housing is 50% and shopping is 30%, both above their advisory lines
        assert_eq!(analysis.recommendations.len(), 2);
    }

    #[test]
    fn test_empty_ledger_has_no_analysis() {
        assert!(analyze(&ExpenseLedger::new()).is_none());
    }
}
