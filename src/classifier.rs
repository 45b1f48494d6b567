//! Intent Classifier
//!
//! Classifies user inputs into enumerated financial intents
//! (e.g. "how do I budget?" → Budgeting, "should I buy stocks?" → Investment).
//! Also provides the rule-based sentiment fallback used when the hosted
//! sentiment endpoint is unreachable.

use crate::models::Sentiment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enumerated financial intents; dispatch happens on the variant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Budgeting,
    Investment,
    Savings,
    Debt,
    Tax,
    Insurance,
    Retirement,
    General,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::Budgeting => "Budgeting",
            Intent::Investment => "Investment",
            Intent::Savings => "Savings",
            Intent::Debt => "Debt",
            Intent::Tax => "Tax",
            Intent::Insurance => "Insurance",
            Intent::Retirement => "Retirement",
            Intent::General => "General",
        };
        write!(f, "{}", s)
    }
}

/// Static keyword lists — zero allocation
const BUDGETING_KEYWORDS: &[&str] = &[
    "budget", "expense", "spend", "cost", "money management",
    "track spending", "monthly budget", "expense tracking",
];

const INVESTMENT_KEYWORDS: &[&str] = &[
    "invest", "stock", "bond", "portfolio", "return", "market",
    "mutual fund", "dividend", "index fund", "etf",
];

const SAVINGS_KEYWORDS: &[&str] = &[
    "save", "saving", "emergency fund", "deposit", "savings account",
    "high yield", "certificate of deposit",
];

const DEBT_KEYWORDS: &[&str] = &[
    "debt", "loan", "credit", "payment", "owe", "mortgage",
    "student loan", "credit card", "refinance",
];

const TAX_KEYWORDS: &[&str] = &[
    "tax", "deduction", "filing", "refund", "irs",
    "tax return", "withholding", "tax planning",
];

const INSURANCE_KEYWORDS: &[&str] = &[
    "insurance", "health insurance", "life insurance",
    "auto insurance", "coverage", "premium",
];

const RETIREMENT_KEYWORDS: &[&str] = &[
    "retirement", "retire", "pension", "401k", "ira",
    "retirement planning", "social security",
];

const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (Intent::Budgeting, BUDGETING_KEYWORDS),
    (Intent::Investment, INVESTMENT_KEYWORDS),
    (Intent::Savings, SAVINGS_KEYWORDS),
    (Intent::Debt, DEBT_KEYWORDS),
    (Intent::Tax, TAX_KEYWORDS),
    (Intent::Insurance, INSURANCE_KEYWORDS),
    (Intent::Retirement, RETIREMENT_KEYWORDS),
];

/// Intent classifier
pub struct IntentClassifier;

impl IntentClassifier {
    /// Classify user input into a financial intent.
    /// The intent with the highest keyword-match count wins; ties resolve
    /// to the earlier entry in the keyword table. No hits means General.
    pub fn classify(text: &str) -> Intent {
        let lowered = text.to_lowercase();

        let mut best = Intent::General;
        let mut best_score = 0usize;

        for (intent, keywords) in INTENT_KEYWORDS {
            let score = keywords
                .iter()
                .filter(|kw| lowered.contains(**kw))
                .count();

            if score > best_score {
                best = *intent;
                best_score = score;
            }
        }

        best
    }
}

//
// ================= Sentiment Fallback =================
//

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "happy", "satisfied", "love", "amazing",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "hate", "worried", "concerned", "problem",
];

/// Rule-based sentiment used when no hosted endpoint is available
pub fn lexicon_sentiment(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();

    let positive = POSITIVE_WORDS
        .iter()
        .filter(|w| lowered.contains(**w))
        .count();
    let negative = NEGATIVE_WORDS
        .iter()
        .filter(|w| lowered.contains(**w))
        .count();

    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budgeting_questions() {
        let cases = vec![
            "help me build a monthly budget",
            "how do I track spending?",
            "my expenses are out of control",
        ];

        for c in cases {
            assert_eq!(IntentClassifier::classify(c), Intent::Budgeting);
        }
    }

    #[test]
    fn test_investment_questions() {
        let cases = vec![
            "should I invest in an index fund?",
            "what stocks belong in my portfolio?",
        ];

        for c in cases {
            assert_eq!(IntentClassifier::classify(c), Intent::Investment);
        }
    }

    #[test]
    fn test_debt_and_retirement() {
        assert_eq!(
            IntentClassifier::classify("how do I pay off my credit card debt?"),
            Intent::Debt
        );
        assert_eq!(
            IntentClassifier::classify("am I saving enough in my 401k for retirement?"),
            Intent::Retirement
        );
    }

    #[test]
    fn test_general_fallback() {
        assert_eq!(IntentClassifier::classify("hello there"), Intent::General);
        assert_eq!(IntentClassifier::classify(""), Intent::General);
    }

    #[test]
    fn test_lexicon_sentiment() {
        assert_eq!(
            lexicon_sentiment("I feel great about my finances, love it"),
            Sentiment::Positive
        );
        assert_eq!(
            lexicon_sentiment("I'm worried about this terrible situation"),
            Sentiment::Negative
        );
        assert_eq!(lexicon_sentiment("what is a bond?"), Sentiment::Neutral);
    }
}
