//! Rule-based advice templates
//!
//! Each enumerated intent maps to a handler that renders markdown advice
//! from the profile, ledger, and configured financial rules. The handlers
//! are pure; personalization and tips wrap the body.

use crate::calc;
use crate::classifier::Intent;
use crate::config::{user_type_defaults, AdvisorConfig};
use crate::expenses::{self, ExpenseLedger};
use crate::models::{GoalTag, RiskTolerance, Sentiment, UserProfile, UserType};
use crate::score;

/// Shown until the user has stored a profile
pub const ONBOARDING_MESSAGE: &str = "\
Welcome to FINOVA - Your AI Financial Advisor! 🎉

I'm here to help you make smarter financial decisions. To provide \
personalized advice, I need to learn about your financial situation first.

Please complete your profile, and then I can help you with:
- 📊 Budget planning and expense tracking
- 💰 Investment strategies
- 🏦 Savings optimization
- 💳 Debt management
- 📈 Financial goal setting

Once your profile is set up, ask me anything about your finances!";

/// Render advice for an intent: personalization prefix, intent-specific
/// body, and a quick tip suffix.
pub fn advise(
    profile: &UserProfile,
    ledger: &ExpenseLedger,
    intent: Intent,
    sentiment: Sentiment,
    config: &AdvisorConfig,
) -> String {
    let body = match intent {
        Intent::Budgeting => budgeting_advice(profile, ledger, config),
        Intent::Investment => investment_advice(profile, ledger),
        Intent::Savings => savings_advice(profile, ledger, config),
        Intent::Debt => debt_advice(profile),
        Intent::Tax => tax_advice(profile),
        Intent::Insurance => insurance_advice(profile),
        Intent::Retirement => retirement_advice(profile),
        Intent::General => general_advice(profile, ledger, config),
    };

    format!(
        "{}{}\n\n💡 **Quick Tip:** {}",
        personalization(profile, sentiment),
        body,
        tip_for(intent)
    )
}

fn personalization(profile: &UserProfile, sentiment: Sentiment) -> String {
    let mut prefix = String::new();

    match sentiment {
        Sentiment::Negative => prefix.push_str(
            "I understand you might be feeling stressed about your finances. \
             Take it one step at a time - small improvements add up! 💪\n\n",
        ),
        Sentiment::Positive => prefix.push_str(
            "Great to see your positive attitude about finances! \
             Let's build on that momentum. 🚀\n\n",
        ),
        Sentiment::Neutral => {}
    }

    match profile.user_type {
        UserType::Student => prefix.push_str(
            "As a student, focus on building good financial habits now - \
             they'll serve you well throughout your career.\n\n",
        ),
        UserType::Professional => prefix.push_str(
            "With your professional status, you're in a great position to \
             accelerate your financial goals.\n\n",
        ),
        UserType::Retiree => prefix.push_str(
            "In retirement, focus on preservation and sustainable income strategies.\n\n",
        ),
    }

    prefix
}

fn tip_for(intent: Intent) -> &'static str {
    match intent {
        Intent::Budgeting => {
            "Try the 24-hour rule: wait a day before making non-essential purchases over $100."
        }
        Intent::Investment => {
            "Dollar-cost averaging reduces the impact of market volatility - \
             invest the same amount regularly."
        }
        Intent::Savings => {
            "Automate your savings by setting up automatic transfers to your \
             savings account on payday."
        }
        Intent::Debt => {
            "Consider the debt avalanche method: pay minimums on all debts, \
             then attack the highest interest rate first."
        }
        Intent::Tax => {
            "Keep receipts and documents organized throughout the year - \
             don't wait until tax season!"
        }
        Intent::Insurance => {
            "Review your insurance coverage annually, especially after major life events."
        }
        Intent::Retirement => {
            "Every year you delay retirement saving, you need to save roughly \
             twice as much to catch up."
        }
        Intent::General => {
            "Track your net worth monthly - it's the best single metric of \
             financial progress."
        }
    }
}

//
// ================= Intent Handlers =================
//

fn budgeting_advice(
    profile: &UserProfile,
    ledger: &ExpenseLedger,
    config: &AdvisorConfig,
) -> String {
    let income = profile.monthly_income;
    let expenses = score::effective_monthly_expenses(profile, ledger);
    let surplus = income - expenses;

    let mut advice = String::from("## 📊 Budgeting Advice\n\n");

    if surplus > 0.0 && income > 0.0 {
        let rate = surplus / income * 100.0;
        advice.push_str(&format!(
            "Great news! You have a monthly surplus of **${:.2}** ({:.1}% savings rate).\n\n",
            surplus, rate
        ));

        let target = config.rules.recommended_savings_rate * 100.0;
        if rate < target / 2.0 {
            advice.push_str(&format!(
                "**Recommendation:** Try to increase your savings rate to at least {:.0}%.\n",
                target / 2.0
            ));
        } else if rate < target {
            advice.push_str(&format!(
                "**Recommendation:** You're doing well! Consider pushing towards \
                 a {:.0}% savings rate.\n",
                target
            ));
        } else {
            advice.push_str(&format!(
                "**Excellent!** You're exceeding the recommended {:.0}% savings rate.\n",
                target
            ));
        }
    } else {
        let deficit = surplus.abs();
        advice.push_str(&format!(
            "⚠️ You're spending **${:.2}** more than you earn monthly.\n\n\
             **Immediate Actions:**\n\
             1. Track every expense for 30 days\n\
             2. Identify your top 3 expense categories\n\
             3. Find ways to reduce spending by 10-15%\n",
            deficit
        ));
    }

    match profile.user_type {
        UserType::Student => advice.push_str(
            "\n**Student-Specific Tips:**\n\
             - Use the 50/30/20 rule: 50% needs, 30% wants, 20% savings\n\
             - Take advantage of student discounts\n\
             - Consider part-time work or freelancing\n",
        ),
        UserType::Professional => advice.push_str(
            "\n**Professional Tips:**\n\
             - Automate your savings and investments\n\
             - Review and optimize subscription services\n\
             - Consider meal prepping to reduce food costs\n",
        ),
        UserType::Retiree => advice.push_str(
            "\n**Retiree Tips:**\n\
             - Keep withdrawals on a fixed schedule\n\
             - Review recurring costs annually\n",
        ),
    }

    advice
}

fn investment_advice(profile: &UserProfile, ledger: &ExpenseLedger) -> String {
    let mut advice = String::from("## 💰 Investment Advice\n\n");

    let (allocation, instruments, expected) = match profile.risk_tolerance {
        RiskTolerance::Low => (
            "20% stocks, 80% bonds/CDs",
            "Treasury bonds, high-grade corporate bonds, CDs",
            "3-5% annually",
        ),
        RiskTolerance::Medium => (
            "60% stocks, 40% bonds",
            "Index funds, target-date funds, balanced funds",
            "6-8% annually",
        ),
        RiskTolerance::High => (
            "80-90% stocks, 10-20% bonds",
            "Growth stocks, small-cap funds, international funds",
            "8-12% annually (with higher volatility)",
        ),
    };

    advice.push_str(&format!(
        "Based on your **{}** risk tolerance:\n\n\
         **Recommended Allocation:** {}\n\
         **Investment Types:** {}\n\
         **Expected Returns:** {}\n\n",
        profile.risk_tolerance, allocation, instruments, expected
    ));

    let typical = user_type_defaults(profile.user_type).risk_tolerance;
    if profile.risk_tolerance != typical {
        advice.push_str(&format!(
            "Note: {} investors typically run a {} risk profile; make sure \
             the difference is intentional.\n\n",
            profile.user_type, typical
        ));
    }

    if profile.age < 30 {
        advice.push_str(
            "**Age Advantage:** You have time for aggressive growth. Consider:\n\
             - Maximum employer retirement match\n\
             - Roth accounts for tax-free growth\n\
             - Growth-focused index funds\n",
        );
    } else if profile.age > 50 {
        advice.push_str(
            "**Pre-Retirement Focus:** Start shifting towards preservation:\n\
             - Gradually reduce stock allocation\n\
             - Increase bond/stable investments\n\
             - Consider catch-up contributions\n",
        );
    }

    let surplus = profile.monthly_income - score::effective_monthly_expenses(profile, ledger);
    if surplus > 0.0 && profile.savings_balance > 0.0 {
        let years = 10.0;
        let rate = 0.07;
        let future_value = calc::compound_interest(
            profile.savings_balance + surplus * 12.0 * years,
            rate,
            years,
            1,
        );
        advice.push_str(&format!(
            "\n**Growth Projection:** If you invest ${:.2}/month for {:.0} years at \
             {:.0}% return, you could have approximately **${:.2}**\n",
            surplus,
            years,
            rate * 100.0,
            future_value
        ));
    }

    advice
}

fn savings_advice(
    profile: &UserProfile,
    ledger: &ExpenseLedger,
    config: &AdvisorConfig,
) -> String {
    let mut advice = String::from("## 🏦 Savings Strategy\n\n");

    let expenses = score::effective_monthly_expenses(profile, ledger);
    let target = calc::emergency_fund_target(expenses, config.rules.emergency_fund_months);
    let coverage = if target > 0.0 {
        profile.savings_balance / target
    } else {
        1.0
    };

    advice.push_str("**Emergency Fund Status:**\n");
    if coverage >= 1.0 {
        advice.push_str(&format!(
            "✅ Excellent! You have {:.1} months of expenses covered.\n\
             Consider high-yield savings accounts or short-term CDs for this money.\n\n",
            if expenses > 0.0 {
                profile.savings_balance / expenses
            } else {
                config.rules.emergency_fund_months
            }
        ));
    } else if coverage >= 0.5 {
        advice.push_str(&format!(
            "⚠️ You're halfway there! Need ${:.2} more for full {:.0}-month coverage.\n\
             Priority: Complete your emergency fund before aggressive investing.\n\n",
            target - profile.savings_balance,
            config.rules.emergency_fund_months
        ));
    } else {
        advice.push_str(&format!(
            "❌ Emergency fund needs attention. Target: ${:.2}\n\
             Current: ${:.2}\n\
             **Action Plan:** Save $500-1000/month until you reach your target.\n\n",
            target, profile.savings_balance
        ));
    }

    advice.push_str(
        "**Best Savings Options:**\n\
         1. **High-Yield Savings Account** (4-5% APY) - Emergency fund\n\
         2. **Certificate of Deposits** (4-6% APY) - Short-term goals\n\
         3. **Money Market Account** (3-4% APY) - Medium liquidity needs\n",
    );

    if !profile.goals.is_empty() {
        advice.push_str("\n**Goal-Based Savings:**\n");
        for goal in &profile.goals {
            match goal {
                GoalTag::BuyAHouse => advice.push_str(&format!(
                    "🏠 **{}:** Save a 20% down payment plus closing costs\n",
                    goal
                )),
                GoalTag::Retirement => advice.push_str(&format!(
                    "🏖️ **{}:** Target 25x annual expenses by retirement\n",
                    goal
                )),
                _ => advice.push_str(&format!(
                    "🎯 **{}:** Create a specific savings timeline\n",
                    goal
                )),
            }
        }
    }

    advice
}

fn debt_advice(profile: &UserProfile) -> String {
    let mut advice = String::from(
        "## 💳 Debt Management Strategy\n\n\
         **Debt Elimination Methods:**\n\n\
         **1. Debt Avalanche (Mathematically Optimal):**\n\
         - Pay minimums on all debts\n\
         - Put extra money toward highest interest rate debt\n\
         - Saves most money long-term\n\n\
         **2. Debt Snowball (Psychologically Motivating):**\n\
         - Pay minimums on all debts\n\
         - Put extra money toward smallest balance\n\
         - Builds momentum and motivation\n\n\
         **Priority Order (Avalanche Method):**\n\
         1. Credit Cards (15-25% interest)\n\
         2. Personal Loans (8-15% interest)\n\
         3. Auto Loans (3-7% interest)\n\
         4. Student Loans (3-6% interest)\n\
         5. Mortgage (3-5% interest)\n\n\
         **Prevention Strategies:**\n\
         - Build an emergency fund to avoid new debt\n\
         - Use credit cards only if you can pay the full balance\n\
         - Consider consolidation for multiple high-interest debts\n\
         - Negotiate with creditors for better rates\n",
    );

    if profile.debt_balance > 0.0 {
        advice.push_str(&format!(
            "\nYour current debt balance is **${:.2}**.",
            profile.debt_balance
        ));
        if let Some(ratio) =
            calc::debt_to_income(profile.debt_balance / 12.0, profile.monthly_income)
        {
            advice.push_str(&format!(
                " Paying it down over a year would take roughly {:.0}% of your \
                 monthly income.",
                ratio * 100.0
            ));
        }
        advice.push('\n');
    }

    advice
}

fn tax_advice(profile: &UserProfile) -> String {
    let mut advice = String::from("## 📋 Tax Optimization\n\n");

    if profile.user_type == UserType::Student {
        advice.push_str(
            "**Student Tax Benefits:**\n\
             - Education tax credits\n\
             - Student loan interest deduction\n\
             - Tax-free scholarships and grants\n\n",
        );
    } else {
        advice.push_str(
            "**Key Tax Strategies:**\n\
             - Maximize pre-tax retirement contributions\n\
             - Contribute to a Traditional or Roth IRA\n\
             - Use an HSA if eligible (triple tax advantage)\n\
             - Track deductible expenses throughout the year\n\n",
        );
    }

    // Annualized income threshold for the higher-bracket strategies
    if profile.monthly_income * 12.0 > 100_000.0 {
        advice.push_str(
            "**Higher Income Strategies:**\n\
             - Consider backdoor Roth conversion\n\
             - Maximize pre-tax retirement contributions\n\
             - Look into tax-loss harvesting\n",
        );
    }

    advice
}

fn insurance_advice(profile: &UserProfile) -> String {
    let mut advice = String::from("## 🛡️ Insurance Protection\n\n**Essential Insurance Types:**\n\n");

    match profile.user_type {
        UserType::Student => advice.push_str(
            "**Student Priorities:**\n\
             1. Health insurance (stay on a family plan if possible)\n\
             2. Renter's insurance (very affordable)\n\
             3. Auto insurance (if you have a car)\n\n",
        ),
        _ => advice.push_str(
            "**Priorities:**\n\
             1. Health insurance (employer or marketplace)\n\
             2. Life insurance (10x annual income if dependents)\n\
             3. Disability insurance (60% of income replacement)\n\
             4. Auto insurance (appropriate coverage limits)\n\
             5. Homeowner's/Renter's insurance\n\n",
        ),
    }

    advice.push_str(
        "**Money-Saving Tips:**\n\
         - Shop around annually for better rates\n\
         - Increase deductibles to lower premiums\n\
         - Bundle policies with the same company for discounts\n\
         - Maintain a good credit score for better rates\n",
    );

    advice
}

fn retirement_advice(profile: &UserProfile) -> String {
    let mut advice = String::from("## 🏖️ Retirement Planning\n\n");

    let retirement_age: u32 = 65;
    let years_to_retirement = retirement_age.saturating_sub(profile.age);

    if years_to_retirement > 0 {
        let needs = calc::retirement_needs(profile.monthly_income * 12.0, 0.8);
        let monthly_target = needs / (years_to_retirement as f64 * 12.0);

        advice.push_str(&format!(
            "**Retirement Timeline:** {} years to go\n\
             **Estimated Need:** ${:.2} (using the 4% withdrawal rule)\n\n\
             **Monthly Savings Target:** ${:.2}\n\n",
            years_to_retirement, needs, monthly_target
        ));
    } else {
        advice.push_str(
            "**Already at retirement age!** Focus on:\n\
             - Optimizing withdrawal strategies\n\
             - Healthcare planning\n\
             - Estate planning\n\n",
        );
    }

    advice.push_str(
        "**Retirement Accounts Priority:**\n\
         1. Employer plan up to the match (free money!)\n\
         2. Roth IRA (tax-free growth)\n\
         3. Max out the employer plan contribution\n\
         4. Taxable investment accounts\n\n",
    );

    if profile.age < 30 {
        advice.push_str(
            "**20s Advantage:** Time is your biggest asset!\n\
             - Start with any amount, even $50/month\n\
             - Take advantage of compound growth\n\
             - Focus on growth investments\n",
        );
    } else if profile.age < 50 {
        advice.push_str(
            "**Peak Earning Years:** Accelerate savings\n\
             - Increase contributions with raises\n\
             - Diversify your investment portfolio\n\
             - Consider professional financial advice\n",
        );
    } else {
        advice.push_str(
            "**Pre-Retirement:** Catch-up mode\n\
             - Use catch-up contributions where available\n\
             - Shift towards more conservative investments\n\
             - Plan for healthcare costs\n",
        );
    }

    advice
}

fn general_advice(
    profile: &UserProfile,
    ledger: &ExpenseLedger,
    config: &AdvisorConfig,
) -> String {
    let mut advice = String::from("## 💼 General Financial Guidance\n\n");

    let health = score::health_score(profile, ledger, &config.rules);
    advice.push_str(&format!(
        "**Your Financial Health Score:** {}/100 (Grade: {})\n\n",
        health.total, health.grade
    ));

    let expenses = score::effective_monthly_expenses(profile, ledger);
    let surplus = profile.monthly_income - expenses;

    advice.push_str("**Personalized Action Plan:**\n");

    let emergency_target =
        calc::emergency_fund_target(expenses, config.rules.emergency_fund_months);
    if profile.savings_balance < emergency_target {
        let deficit = emergency_target - profile.savings_balance;
        advice.push_str(&format!(
            "1. **Build Emergency Fund:** Save ${:.2} more (${:.2}/month for \
             {:.0} months)\n",
            deficit,
            deficit / config.rules.emergency_fund_months,
            config.rules.emergency_fund_months
        ));
    } else {
        advice.push_str("1. ✅ **Emergency Fund Complete:** Well done!\n");
    }

    advice.push_str(
        "2. **Eliminate High-Interest Debt:** Pay off credit cards and personal \
         loans first\n",
    );

    let defaults = user_type_defaults(profile.user_type);
    if profile.age < 65 {
        advice.push_str(&format!(
            "3. **Retirement Savings:** Aim for {:.0}% of income in retirement accounts\n",
            defaults.savings_rate * 100.0
        ));
    }

    if surplus > 0.0 {
        advice.push_str(&format!(
            "4. **Investment Growth:** With ${:.2} monthly surplus, consider \
             diversified investing\n",
            surplus
        ));
    }

    advice.push_str(&format!(
        "\n**Typical {} priorities:** {}\n",
        profile.user_type,
        defaults.priorities.join(", ")
    ));

    if let Some(analysis) = expenses::analyze(ledger) {
        if !analysis.recommendations.is_empty() {
            advice.push_str("\n**Spending Watchlist:**\n");
            for rec in &analysis.recommendations {
                advice.push_str(&format!("- {}\n", rec));
            }
        }
    }

    advice.push_str(
        "\n**Key Financial Principles:**\n\
         - Pay yourself first (automate savings)\n\
         - Live below your means\n\
         - Diversify investments\n\
         - Review and adjust regularly\n",
    );

    advice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, RiskTolerance};
    use chrono::Utc;
    use std::collections::BTreeSet;

    fn test_profile(user_type: UserType, risk: RiskTolerance) -> UserProfile {
        UserProfile {
            name: "Riley".to_string(),
            age: 27,
            monthly_income: 5000.0,
            occupation: "Engineer".to_string(),
            user_type,
            risk_tolerance: risk,
            savings_balance: 8000.0,
            debt_balance: 4000.0,
            monthly_expenses: 3000.0,
            goals: [GoalTag::BuyAHouse, GoalTag::Retirement]
                .into_iter()
                .collect::<BTreeSet<_>>(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_budgeting_surplus_path() {
        let profile = test_profile(UserType::Professional, RiskTolerance::Medium);
        let advice = advise(
            &profile,
            &ExpenseLedger::new(),
            Intent::Budgeting,
            Sentiment::Neutral,
            &AdvisorConfig::default(),
        );

        assert!(advice.contains("monthly surplus of **$2000.00**"));
        assert!(advice.contains("Professional Tips"));
        assert!(advice.contains("Quick Tip"));
    }

    #[test]
    fn test_budgeting_deficit_path() {
        let mut profile = test_profile(UserType::Student, RiskTolerance::Medium);
        profile.monthly_expenses = 6000.0;

        let advice = advise(
            &profile,
            &ExpenseLedger::new(),
            Intent::Budgeting,
            Sentiment::Negative,
            &AdvisorConfig::default(),
        );

        assert!(advice.contains("more than you earn"));
        assert!(advice.contains("stressed"));
        assert!(advice.contains("Student-Specific Tips"));
    }

    #[test]
    fn test_investment_respects_risk_tolerance() {
        let low = test_profile(UserType::Professional, RiskTolerance::Low);
        let high = test_profile(UserType::Professional, RiskTolerance::High);
        let config = AdvisorConfig::default();
        let ledger = ExpenseLedger::new();

        let low_advice = advise(&low, &ledger, Intent::Investment, Sentiment::Neutral, &config);
        let high_advice = advise(&high, &ledger, Intent::Investment, Sentiment::Neutral, &config);

        assert!(low_advice.contains("20% stocks, 80% bonds/CDs"));
        assert!(high_advice.contains("80-90% stocks"));
        assert!(low_advice.contains("Growth Projection"));
    }

    #[test]
    fn test_savings_reports_goal_notes() {
        let profile = test_profile(UserType::Professional, RiskTolerance::Medium);
        let advice = advise(
            &profile,
            &ExpenseLedger::new(),
            Intent::Savings,
            Sentiment::Neutral,
            &AdvisorConfig::default(),
        );

        assert!(advice.contains("Emergency Fund Status"));
        assert!(advice.contains("Buy a House"));
        assert!(advice.contains("25x annual expenses"));
    }

    #[test]
    fn test_general_includes_score_and_watchlist() {
        let profile = test_profile(UserType::Professional, RiskTolerance::Medium);
        let mut ledger = ExpenseLedger::new();
        ledger.add(ExpenseCategory::Shopping, 1200.0).unwrap();
        ledger.add(ExpenseCategory::Housing, 1500.0).unwrap();

        let advice = advise(
            &profile,
            &ledger,
            Intent::General,
            Sentiment::Neutral,
            &AdvisorConfig::default(),
        );

        assert!(advice.contains("Financial Health Score"));
        assert!(advice.contains("Spending Watchlist"));
    }

    #[test]
    fn test_every_intent_renders() {
        let profile = test_profile(UserType::Retiree, RiskTolerance::Low);
        let ledger = ExpenseLedger::new();
        let config = AdvisorConfig::default();

        for intent in [
            Intent::Budgeting,
            Intent::Investment,
            Intent::Savings,
            Intent::Debt,
            Intent::Tax,
            Intent::Insurance,
            Intent::Retirement,
            Intent::General,
        ] {
            let advice = advise(&profile, &ledger, intent, Sentiment::Neutral, &config);
            assert!(advice.contains("Quick Tip"), "{:?} lost its tip", intent);
            assert!(advice.len() > 100, "{:?} rendered too little", intent);
        }
    }
}
