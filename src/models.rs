//! Core data models for the financial advisor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Student,
    Professional,
    Retiree,
}

/// Enumerated financial goal tags a user can select
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum GoalTag {
    EmergencyFund,
    BuyAHouse,
    Retirement,
    PayOffDebt,
    InvestmentGrowth,
    Education,
    Travel,
    StartBusiness,
}

/// Fixed set of expense categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Housing,
    Food,
    Transportation,
    Healthcare,
    Insurance,
    Entertainment,
    Shopping,
    Education,
    DebtPayments,
    Savings,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 11] = [
        ExpenseCategory::Housing,
        ExpenseCategory::Food,
        ExpenseCategory::Transportation,
        ExpenseCategory::Healthcare,
        ExpenseCategory::Insurance,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Shopping,
        ExpenseCategory::Education,
        ExpenseCategory::DebtPayments,
        ExpenseCategory::Savings,
        ExpenseCategory::Other,
    ];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

//
// ================= User Profile =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    /// Monthly income, same period as expenses
    pub monthly_income: f64,
    pub occupation: String,
    pub user_type: UserType,
    pub risk_tolerance: RiskTolerance,
    pub savings_balance: f64,
    pub debt_balance: f64,
    /// Baseline monthly expenses, used when no itemized expenses are recorded
    pub monthly_expenses: f64,
    pub goals: BTreeSet<GoalTag>,
    pub created_at: DateTime<Utc>,
}

//
// ================= Health Score =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

/// Sub-scores of the financial health score, each in [0, 25]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub emergency_fund: f64,
    pub savings_rate: f64,
    pub budget: f64,
    pub goal_diversification: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthScore {
    /// Total score in [0, 100]
    pub total: u32,
    pub grade: Grade,
    pub breakdown: ScoreBreakdown,
    pub feedback: Vec<String>,
}

//
// ================= Chat =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    /// Answer produced by a hosted generation endpoint
    Inference,
    /// Answer produced from the rule-based advice templates
    Rules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    pub intent: crate::classifier::Intent,
    pub sentiment: Sentiment,
    pub source: AnswerSource,
}

//
// ================= Lenient Parsing =================
//

/// Parse a risk tolerance from user-facing strings.
/// Accepts the conservative/moderate/aggressive vocabulary as aliases.
pub fn parse_risk(r: &str) -> RiskTolerance {
    match r.to_lowercase().as_str() {
        "low" | "conservative" => RiskTolerance::Low,
        "medium" | "moderate" => RiskTolerance::Medium,
        "high" | "aggressive" => RiskTolerance::High,
        _ => RiskTolerance::Medium,
    }
}

pub fn parse_user_type(t: &str) -> UserType {
    match t.to_lowercase().as_str() {
        "student" => UserType::Student,
        "retiree" | "retired" => UserType::Retiree,
        _ => UserType::Professional,
    }
}

/// Parse a goal tag from form labels ("Buy a House") or snake_case tokens.
pub fn parse_goal(g: &str) -> Option<GoalTag> {
    let normalized: String = g
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    match normalized.as_str() {
        "emergencyfund" => Some(GoalTag::EmergencyFund),
        "buyahouse" | "house" | "homepurchase" => Some(GoalTag::BuyAHouse),
        "retirement" => Some(GoalTag::Retirement),
        "payoffdebt" | "debtfree" => Some(GoalTag::PayOffDebt),
        "investmentgrowth" | "investing" => Some(GoalTag::InvestmentGrowth),
        "education" => Some(GoalTag::Education),
        "travel" => Some(GoalTag::Travel),
        "startbusiness" | "business" => Some(GoalTag::StartBusiness),
        _ => None,
    }
}

pub fn parse_category(c: &str) -> Option<ExpenseCategory> {
    let normalized: String = c
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .collect();

    match normalized.as_str() {
        "housing" => Some(ExpenseCategory::Housing),
        "food" => Some(ExpenseCategory::Food),
        "transportation" | "transport" => Some(ExpenseCategory::Transportation),
        "healthcare" | "health" => Some(ExpenseCategory::Healthcare),
        "insurance" => Some(ExpenseCategory::Insurance),
        "entertainment" => Some(ExpenseCategory::Entertainment),
        "shopping" => Some(ExpenseCategory::Shopping),
        "education" => Some(ExpenseCategory::Education),
        "debtpayments" | "debt" => Some(ExpenseCategory::DebtPayments),
        "savings" => Some(ExpenseCategory::Savings),
        "other" => Some(ExpenseCategory::Other),
        _ => None,
    }
}

//
// ================= Display =================
//

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskTolerance::Low => "Low",
            RiskTolerance::Medium => "Medium",
            RiskTolerance::High => "High",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserType::Student => "Student",
            UserType::Professional => "Professional",
            UserType::Retiree => "Retiree",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for GoalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GoalTag::EmergencyFund => "Emergency Fund",
            GoalTag::BuyAHouse => "Buy a House",
            GoalTag::Retirement => "Retirement",
            GoalTag::PayOffDebt => "Pay off Debt",
            GoalTag::InvestmentGrowth => "Investment Growth",
            GoalTag::Education => "Education",
            GoalTag::Travel => "Travel",
            GoalTag::StartBusiness => "Start Business",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExpenseCategory::Housing => "Housing",
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transportation => "Transportation",
            ExpenseCategory::Healthcare => "Healthcare",
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::DebtPayments => "Debt Payments",
            ExpenseCategory::Savings => "Savings",
            ExpenseCategory::Other => "Other",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_risk_aliases() {
        assert_eq!(parse_risk("conservative"), RiskTolerance::Low);
        assert_eq!(parse_risk("Moderate"), RiskTolerance::Medium);
        assert_eq!(parse_risk("AGGRESSIVE"), RiskTolerance::High);
        assert_eq!(parse_risk("unknown"), RiskTolerance::Medium);
    }

    #[test]
    fn test_parse_goal_labels() {
        assert_eq!(parse_goal("Buy a House"), Some(GoalTag::BuyAHouse));
        assert_eq!(parse_goal("emergency_fund"), Some(GoalTag::EmergencyFund));
        assert_eq!(parse_goal("Pay off Debt"), Some(GoalTag::PayOffDebt));
        assert_eq!(parse_goal("winning the lottery"), None);
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("Debt Payments"), Some(ExpenseCategory::DebtPayments));
        assert_eq!(parse_category("transport"), Some(ExpenseCategory::Transportation));
        assert_eq!(parse_category("nonsense"), None);
    }
}
