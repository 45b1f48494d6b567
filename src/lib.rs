//! FINOVA — Personal Finance Advisor
//!
//! A session-scoped financial advisor that:
//! - Collects a user profile and categorized monthly expenses
//! - Classifies chat input into enumerated financial intents
//! - Analyzes sentiment via hosted inference endpoints (rule-based fallback)
//! - Generates personalized advice, optionally augmented by a hosted
//!   text-generation model
//! - Computes a rule-based 0–100 financial health score
//! - Produces spending analyses, chart-ready data, and monthly reports
//!
//! PIPELINE:
//! INPUT → SANITIZE → SENTIMENT → INTENT → ADVISE → RESPOND

pub mod advice;
pub mod advisor;
pub mod api;
pub mod calc;
pub mod charts;
pub mod classifier;
pub mod config;
pub mod error;
pub mod expenses;
pub mod inference;
pub mod models;
pub mod report;
pub mod score;
pub mod session;
pub mod validate;

pub use error::Result;

// Re-export common types
pub use classifier::{Intent, IntentClassifier};
pub use models::*;
