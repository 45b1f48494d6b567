//! Input sanitization and profile validation
//!
//! User text is sanitized before it reaches the classifier or any hosted
//! endpoint; profile numbers are validated before they reach the scoring
//! calculator.

use crate::models::UserProfile;

const MAX_INPUT_LEN: usize = 1000;

/// Strip markup-significant characters and bound the length
pub fn sanitize_input(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | '&'))
        .collect();

    let mut trimmed = cleaned.trim().to_string();
    if trimmed.len() > MAX_INPUT_LEN {
        // Truncate on a char boundary
        let mut cut = MAX_INPUT_LEN;
        while !trimmed.is_char_boundary(cut) {
            cut -= 1;
        }
        trimmed.truncate(cut);
    }
    trimmed
}

/// Validate a profile; returns the list of problems (empty means valid)
pub fn validate_profile(profile: &UserProfile) -> Vec<String> {
    let mut issues = Vec::new();

    if profile.name.trim().is_empty() {
        issues.push("Name cannot be empty".to_string());
    }

    if !(18..=100).contains(&profile.age) {
        issues.push("Age must be between 18 and 100".to_string());
    }

    for (label, value) in [
        ("Monthly income", profile.monthly_income),
        ("Savings balance", profile.savings_balance),
        ("Debt balance", profile.debt_balance),
        ("Monthly expenses", profile.monthly_expenses),
    ] {
        if !value.is_finite() {
            issues.push(format!("{} must be a number", label));
        } else if value < 0.0 {
            issues.push(format!("{} cannot be negative", label));
        }
    }

    if profile.monthly_income > 0.0
        && profile.monthly_expenses > profile.monthly_income * 2.0
    {
        issues.push("Monthly expenses seem unusually high compared to income".to_string());
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RiskTolerance, UserType};
    use chrono::Utc;
    use std::collections::BTreeSet;

    fn base_profile() -> UserProfile {
        UserProfile {
            name: "Sam".to_string(),
            age: 25,
            monthly_income: 4000.0,
            occupation: "Teacher".to_string(),
            user_type: UserType::Professional,
            risk_tolerance: RiskTolerance::Medium,
            savings_balance: 5000.0,
            debt_balance: 0.0,
            monthly_expenses: 3000.0,
            goals: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_sanitize_strips_and_trims() {
        assert_eq!(sanitize_input("  <b>hello</b> & 'world' \"x\" "), "bhello/b  world x");
    }

    #[test]
    fn test_sanitize_truncates() {
        let long = "a".repeat(2000);
        assert_eq!(sanitize_input(&long).len(), 1000);
    }

    #[test]
    fn test_valid_profile_has_no_issues() {
        assert!(validate_profile(&base_profile()).is_empty());
    }

    #[test]
    fn test_invalid_profile_collects_issues() {
        let mut p = base_profile();
        p.age = 12;
        p.monthly_income = -1.0;
        p.savings_balance = f64::NAN;

        let issues = validate_profile(&p);
        assert!(issues.iter().any(|i| i.contains("Age")));
        assert!(issues.iter().any(|i| i.contains("income")));
        assert!(issues.iter().any(|i| i.contains("Savings")));
    }

    #[test]
    fn test_implausible_expenses_flagged() {
        let mut p = base_profile();
        p.monthly_expenses = 9000.0;
        let issues = validate_profile(&p);
        assert!(issues.iter().any(|i| i.contains("unusually high")));
    }
}
