//! Monthly report generation
//!
//! Renders a markdown financial report from the profile, ledger, health
//! score, and spending analysis.

use crate::config::FinancialRules;
use crate::expenses::{self, ExpenseLedger};
use crate::models::UserProfile;
use crate::score;
use chrono::{DateTime, Utc};

/// Generate a monthly financial report in markdown
pub fn monthly_report(
    profile: &UserProfile,
    ledger: &ExpenseLedger,
    rules: &FinancialRules,
    as_of: DateTime<Utc>,
) -> String {
    let monthly_income = profile.monthly_income;
    let total_expenses = score::effective_monthly_expenses(profile, ledger);
    let net_cash_flow = monthly_income - total_expenses;

    let mut report = format!(
        "# Monthly Financial Report - {}\n\n\
         ## Overview\n\
         - **Name:** {}\n\
         - **Monthly Income:** ${:.2}\n\
         - **Total Expenses:** ${:.2}\n\
         - **Net Cash Flow:** ${:.2}\n\n\
         ## Financial Health Score\n",
        as_of.format("%B %Y"),
        profile.name,
        monthly_income,
        total_expenses,
        net_cash_flow,
    );

    let health = score::health_score(profile, ledger, rules);
    report.push_str(&format!(
        "**Score:** {}/100 (Grade: {})\n\n",
        health.total, health.grade
    ));

    for item in &health.feedback {
        report.push_str(&format!("- {}\n", item));
    }

    if let Some(analysis) = expenses::analyze(ledger) {
        report.push_str("\n## Expense Analysis\n");
        report.push_str(&format!(
            "- **Highest Category:** {} (${:.2})\n",
            analysis.highest_category,
            ledger.amount(analysis.highest_category)
        ));

        if !analysis.recommendations.is_empty() {
            report.push_str("\n### Recommendations:\n");
            for rec in &analysis.recommendations {
                report.push_str(&format!("- {}\n", rec));
            }
        }
    }

    if !profile.goals.is_empty() {
        report.push_str("\n## Goal Progress\n");
        for goal in &profile.goals {
            report.push_str(&format!("- {}: In Progress\n", goal));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, GoalTag, RiskTolerance, UserType};
    use std::collections::BTreeSet;

    #[test]
    fn test_report_sections() {
        let profile = UserProfile {
            name: "Avery".to_string(),
            age: 32,
            monthly_income: 5000.0,
            occupation: "Nurse".to_string(),
            user_type: UserType::Professional,
            risk_tolerance: RiskTolerance::Medium,
            savings_balance: 12_000.0,
            debt_balance: 2_000.0,
            monthly_expenses: 0.0,
            goals: [GoalTag::Retirement].into_iter().collect::<BTreeSet<_>>(),
            created_at: Utc::now(),
        };

        let mut ledger = ExpenseLedger::new();
        ledger.add(ExpenseCategory::Housing, 1600.0).unwrap();
        ledger.add(ExpenseCategory::Food, 500.0).unwrap();

        let report = monthly_report(
            &profile,
            &ledger,
            &FinancialRules::default(),
            Utc::now(),
        );

        assert!(report.contains("Avery"));
        assert!(report.contains("## Financial Health Score"));
        assert!(report.contains("## Expense Analysis"));
        assert!(report.contains("Highest Category:** Housing"));
        assert!(report.contains("Retirement: In Progress"));
    }
}
