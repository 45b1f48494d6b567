//! Financial health score calculator
//!
//! Pure function from a profile and expense ledger to a 0–100 score with a
//! four-part breakdown. Deterministic, no side effects; zero income and
//! zero expenses are defined inputs, never division errors.

use crate::config::{category_income_share, FinancialRules};
use crate::expenses::ExpenseLedger;
use crate::models::{Grade, HealthScore, ScoreBreakdown, UserProfile};

const SUB_SCORE_MAX: f64 = 25.0;

/// Effective monthly expenses: itemized ledger total when present,
/// otherwise the profile's baseline figure.
pub fn effective_monthly_expenses(profile: &UserProfile, ledger: &ExpenseLedger) -> f64 {
    if ledger.is_empty() {
        profile.monthly_expenses.max(0.0)
    } else {
        ledger.total()
    }
}

/// Compute the financial health score for a profile and ledger
pub fn health_score(
    profile: &UserProfile,
    ledger: &ExpenseLedger,
    rules: &FinancialRules,
) -> HealthScore {
    let income = profile.monthly_income.max(0.0);
    let expenses = effective_monthly_expenses(profile, ledger);
    let savings = profile.savings_balance.max(0.0);

    let mut feedback = Vec::new();

    // ── Emergency fund (0–25) ──
    let emergency_target = expenses * rules.emergency_fund_months;
    // A zero target means no expenses to cover; coverage is full by definition
    let coverage = if emergency_target > 0.0 {
        (savings / emergency_target).min(1.0)
    } else {
        1.0
    };
    let emergency_fund = coverage * SUB_SCORE_MAX;

    let months_covered = if expenses > 0.0 {
        savings / expenses
    } else {
        rules.emergency_fund_months
    };
    if months_covered >= rules.emergency_fund_months {
        feedback.push("✅ Excellent emergency fund coverage".to_string());
    } else if months_covered >= rules.emergency_fund_months / 2.0 {
        feedback.push(format!(
            "⚠️ Good emergency fund, consider building to {:.0} months",
            rules.emergency_fund_months
        ));
    } else {
        feedback.push(format!(
            "❌ Build your emergency fund (aim for {:.0} months of expenses)",
            rules.emergency_fund_months
        ));
    }

    // ── Savings rate (0–25) ──
    let savings_rate_value = if income > 0.0 {
        ((income - expenses) / income).max(0.0)
    } else {
        0.0
    };
    let savings_rate = (savings_rate_value.min(rules.recommended_savings_rate)
        / rules.recommended_savings_rate)
        * SUB_SCORE_MAX;

    if savings_rate_value >= rules.recommended_savings_rate {
        feedback.push("✅ Great savings rate!".to_string());
    } else if savings_rate_value >= rules.recommended_savings_rate / 2.0 {
        feedback.push("⚠️ Good savings rate, try to increase if possible".to_string());
    } else {
        feedback.push("❌ Focus on increasing your savings rate".to_string());
    }

    // ── Budget management (0–25) ──
    let over_threshold: Vec<String> = ledger
        .iter()
        .filter(|(category, amount)| {
            if *amount <= 0.0 {
                return false;
            }
            if income <= 0.0 {
                // Any spending without income counts against the budget
                return true;
            }
            *amount > category_income_share(*category) * income
        })
        .map(|(category, _)| category.to_string())
        .collect();

    let budget =
        (SUB_SCORE_MAX - rules.budget_penalty * over_threshold.len() as f64).max(0.0);

    if over_threshold.is_empty() {
        feedback.push("✅ Spending is within recommended category limits".to_string());
    } else {
        feedback.push(format!(
            "❌ Over recommended share of income: {}",
            over_threshold.join(", ")
        ));
    }

    // ── Goal diversification (0–25) ──
    let goal_count = profile.goals.len() as f64;
    let per_goal = SUB_SCORE_MAX / rules.goal_target_count as f64;
    let goal_diversification = (goal_count * per_goal).min(SUB_SCORE_MAX);

    if profile.goals.is_empty() {
        feedback.push("❌ Consider setting specific financial goals".to_string());
    } else {
        feedback.push(format!(
            "✅ You have {} financial goal(s) defined",
            profile.goals.len()
        ));
    }

    let total = (emergency_fund + savings_rate + budget + goal_diversification)
        .round()
        .clamp(0.0, 100.0) as u32;

    HealthScore {
        total,
        grade: grade_for(total),
        breakdown: ScoreBreakdown {
            emergency_fund,
            savings_rate,
            budget,
            goal_diversification,
        },
        feedback,
    }
}

fn grade_for(score: u32) -> Grade {
    match score {
        90..=100 => Grade::A,
        80..=89 => Grade::B,
        70..=79 => Grade::C,
        60..=69 => Grade::D,
        _ => Grade::F,
    }
}
