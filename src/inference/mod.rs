//! Hosted inference client abstraction
//!
//! The advisor treats sentiment analysis, text generation, summarization,
//! and question answering as opaque request/response capabilities behind
//! the `InferenceClient` trait, so scoring and advice logic can be tested
//! without network access via the mock implementation.

use crate::models::Sentiment;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod huggingface;
pub mod mock;

pub use huggingface::HuggingFaceClient;
pub use mock::MockClient;

/// Ranked sentiment label with model confidence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentScore {
    pub sentiment: Sentiment,
    pub score: f32,
}

/// Extracted answer span from a question-answering model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSpan {
    pub answer: String,
    pub score: f32,
}

/// Trait for hosted inference capabilities (injected, substitutable)
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Classify the sentiment of a piece of text
    async fn sentiment(&self, text: &str) -> Result<SentimentScore>;

    /// Generate free-form text from a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Summarize a longer passage
    async fn summarize(&self, text: &str) -> Result<String>;

    /// Extract an answer span for a question over a context passage
    async fn answer(&self, question: &str, context: &str) -> Result<AnswerSpan>;

    /// Check whether the backend is reachable
    async fn health_check(&self) -> bool;

    /// Host URL (for logging)
    fn host(&self) -> &str;
}
