//! Mock inference client for tests and offline runs
//!
//! Returns deterministic responses for every capability. Can be flipped
//! unhealthy to exercise the fallback paths.

use crate::classifier::lexicon_sentiment;
use crate::error::AdvisorError;
use crate::Result;
use async_trait::async_trait;

use super::{AnswerSpan, InferenceClient, SentimentScore};

#[derive(Clone, Default)]
pub struct MockClient {
    /// When false, every call fails with an inference error
    pub healthy: bool,
}

impl MockClient {
    pub fn new() -> Self {
        Self { healthy: true }
    }

    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }

    fn ensure_healthy(&self) -> Result<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(AdvisorError::InferenceError(
                "mock backend marked unhealthy".to_string(),
            ))
        }
    }
}

#[async_trait]
impl InferenceClient for MockClient {
    async fn sentiment(&self, text: &str) -> Result<SentimentScore> {
        self.ensure_healthy()?;

        Ok(SentimentScore {
            sentiment: lexicon_sentiment(text),
            score: 0.9,
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.ensure_healthy()?;

        // A short deterministic paragraph, keyed off the prompt so tests
        // can tell responses apart.
        let head: String = prompt.chars().take(40).collect();
        Ok(format!(
            "Based on your situation ({}…), keep your spending below your income, \
             automate transfers to savings on payday, and review your plan monthly.",
            head.trim()
        ))
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        self.ensure_healthy()?;

        let summary: String = text.chars().take(120).collect();
        Ok(summary)
    }

    async fn answer(&self, _question: &str, context: &str) -> Result<AnswerSpan> {
        self.ensure_healthy()?;

        // First sentence of the context stands in for an extracted span
        let answer = context
            .split('.')
            .next()
            .unwrap_or(context)
            .trim()
            .to_string();

        Ok(AnswerSpan {
            answer,
            score: 0.8,
        })
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;

    #[tokio::test]
    async fn test_mock_sentiment() {
        let mock = MockClient::new();
        let result = mock
            .sentiment("I feel great about my savings")
            .await
            .unwrap();
        assert_eq!(result.sentiment, Sentiment::Positive);
    }

    #[tokio::test]
    async fn test_mock_generate() {
        let mock = MockClient::new();
        let text = mock.generate("How should I budget?").await.unwrap();
        assert!(text.contains("How should I budget?"));
    }

    #[tokio::test]
    async fn test_unhealthy_mock_fails() {
        let mock = MockClient::unhealthy();
        assert!(!mock.health_check().await);
        assert!(mock.sentiment("anything").await.is_err());
        assert!(mock.generate("anything").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_answer_extracts_first_sentence() {
        let mock = MockClient::new();
        let span = mock
            .answer("how much?", "Save 20% of income. More if you can.")
            .await
            .unwrap();
        assert_eq!(span.answer, "Save 20% of income");
    }
}
