//! Advisor configuration
//!
//! Named constants for the scoring formula, budget thresholds, user-type
//! defaults, and hosted model identifiers. Values are defaults, not
//! invariants; everything here can be overridden by the embedding
//! application or environment.

use crate::models::{ExpenseCategory, RiskTolerance, UserType};
use std::env;
use std::time::Duration;

/// Default base URL of the hosted inference service
pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";

//
// ================= Hosted Models =================
//

/// Model identifiers for each hosted inference task
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    pub sentiment: String,
    pub generation: String,
    pub summarization: String,
    pub question_answering: String,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            sentiment: "cardiffnlp/twitter-roberta-base-sentiment-latest".to_string(),
            generation: "microsoft/DialoGPT-medium".to_string(),
            summarization: "facebook/bart-large-cnn".to_string(),
            question_answering: "deepset/roberta-base-squad2".to_string(),
        }
    }
}

//
// ================= Scoring Rules =================
//

#[derive(Debug, Clone)]
pub struct FinancialRules {
    /// Months of expenses the emergency fund should cover
    pub emergency_fund_months: f64,
    /// Savings rate that earns full marks
    pub recommended_savings_rate: f64,
    /// Debt-to-income ratio considered the safe ceiling
    pub max_debt_to_income: f64,
    /// Distinct goal count that earns full diversification marks
    pub goal_target_count: u32,
    /// Points deducted per category spending above its threshold
    pub budget_penalty: f64,
}

impl Default for FinancialRules {
    fn default() -> Self {
        Self {
            emergency_fund_months: 6.0,
            recommended_savings_rate: 0.20,
            max_debt_to_income: 0.36,
            goal_target_count: 5,
            budget_penalty: 5.0,
        }
    }
}

/// Recommended share of monthly income for a category.
/// Spending above `share * income` counts against the budget sub-score.
pub fn category_income_share(category: ExpenseCategory) -> f64 {
    match category {
        ExpenseCategory::Housing => 0.30,
        ExpenseCategory::Food => 0.15,
        ExpenseCategory::Transportation => 0.15,
        ExpenseCategory::Healthcare => 0.12,
        ExpenseCategory::Insurance => 0.10,
        ExpenseCategory::Entertainment => 0.10,
        ExpenseCategory::Shopping => 0.10,
        ExpenseCategory::Education => 0.10,
        ExpenseCategory::DebtPayments => 0.20,
        // Money moved to savings is never over-spending
        ExpenseCategory::Savings => 1.0,
        ExpenseCategory::Other => 0.15,
    }
}

//
// ================= User Type Defaults =================
//

#[derive(Debug, Clone)]
pub struct UserTypeDefaults {
    pub savings_rate: f64,
    pub risk_tolerance: RiskTolerance,
    pub priorities: &'static [&'static str],
}

pub fn user_type_defaults(user_type: UserType) -> UserTypeDefaults {
    match user_type {
        UserType::Student => UserTypeDefaults {
            savings_rate: 0.10,
            risk_tolerance: RiskTolerance::Medium,
            priorities: &["emergency fund", "education", "debt management"],
        },
        UserType::Professional => UserTypeDefaults {
            savings_rate: 0.25,
            risk_tolerance: RiskTolerance::Medium,
            priorities: &["retirement", "investment", "house purchase"],
        },
        UserType::Retiree => UserTypeDefaults {
            savings_rate: 0.05,
            risk_tolerance: RiskTolerance::Low,
            priorities: &["income preservation", "healthcare", "estate planning"],
        },
    }
}

//
// ================= Projection =================
//

#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Assumed annual return for savings growth projections
    pub annual_return: f64,
    pub horizon_months: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            annual_return: 0.04,
            horizon_months: 120,
        }
    }
}

//
// ================= Inference Settings =================
//

#[derive(Debug, Clone)]
pub struct InferenceSettings {
    /// Bearer credential for the hosted inference service
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_INFERENCE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

//
// ================= Top-Level Config =================
//

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub inference: InferenceSettings,
    pub models: ModelCatalog,
    pub rules: FinancialRules,
    pub projection: ProjectionConfig,
    /// Chat turns kept per session; oldest turns are dropped past this
    pub max_transcript_turns: usize,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            inference: InferenceSettings::default(),
            models: ModelCatalog::default(),
            rules: FinancialRules::default(),
            projection: ProjectionConfig::default(),
            max_transcript_turns: 50,
        }
    }
}

impl AdvisorConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let api_key = env::var("HUGGINGFACE_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let base_url = env::var("HUGGINGFACE_API_URL")
            .unwrap_or_else(|_| DEFAULT_INFERENCE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            inference: InferenceSettings {
                api_key,
                base_url,
                ..InferenceSettings::default()
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = FinancialRules::default();
        assert_eq!(rules.emergency_fund_months, 6.0);
        assert_eq!(rules.recommended_savings_rate, 0.20);
        assert_eq!(rules.goal_target_count, 5);
    }

    #[test]
    fn test_category_shares_cover_all_categories() {
        for category in ExpenseCategory::ALL {
            let share = category_income_share(category);
            assert!(share > 0.0 && share <= 1.0);
        }
    }

    #[test]
    fn test_from_env_defaults() {
        let config = AdvisorConfig::from_env();
        assert!(config.models.sentiment.contains('/'));
        assert!(config.inference.base_url.starts_with("http"));
        assert!(config.max_transcript_turns > 0);
    }
}
