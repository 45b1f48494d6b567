//! HuggingFace Inference API client
//!
//! Sends raw text to named hosted model endpoints and parses the
//! task-specific response shapes. Uses a long-lived reqwest::Client for
//! connection pooling.

use crate::config::{InferenceSettings, ModelCatalog};
use crate::error::AdvisorError;
use crate::models::Sentiment;
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use super::{AnswerSpan, InferenceClient, SentimentScore};

/// Reusable inference client (connection-pooled)
pub struct HuggingFaceClient {
    client: Client,
    api_key: String,
    base_url: String,
    models: ModelCatalog,
}

impl HuggingFaceClient {
    /// Build a client from settings. A missing credential is a
    /// configuration error surfaced at startup, not at first use.
    pub fn new(settings: &InferenceSettings, models: ModelCatalog) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AdvisorError::ConfigError(
                    "HUGGINGFACE_API_KEY not configured. See .env.example for details."
                        .to_string(),
                )
            })?;

        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(settings.timeout)
            .build()
            .map_err(AdvisorError::HttpError)?;

        Ok(Self {
            client,
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            models,
        })
    }

    async fn post_model<B: Serialize, R: DeserializeOwned>(
        &self,
        model: &str,
        payload: &B,
    ) -> Result<R> {
        let url = format!("{}/{}", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Inference request to {} failed: {}", model, e);
                AdvisorError::InferenceError(format!("{}: {}", model, e))
            })?;

        // 503 means the hosted model is cold; callers surface this as a
        // "try again in a moment" message, not a hard failure.
        if response.status() == StatusCode::SERVICE_UNAVAILABLE {
            return Err(AdvisorError::ModelLoading(model.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Inference endpoint {} returned {}: {}", model, status, body);
            return Err(AdvisorError::InferenceError(format!(
                "{} returned {}: {}",
                model, status, body
            )));
        }

        response.json::<R>().await.map_err(|e| {
            error!("Failed to parse response from {}: {}", model, e);
            AdvisorError::InferenceError(format!("{} parse error: {}", model, e))
        })
    }
}

//
// ================= Wire Types =================
//

#[derive(Debug, Serialize)]
struct TextRequest<'a> {
    inputs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<GenerationParameters>,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_length: u32,
    temperature: f32,
    do_sample: bool,
}

#[derive(Debug, Serialize)]
struct QaRequest<'a> {
    inputs: QaInputs<'a>,
}

#[derive(Debug, Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct SummaryText {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
struct QaResponse {
    answer: String,
    score: f32,
}

/// Map endpoint labels to a sentiment. Covers both the indexed LABEL_n
/// scheme and named labels.
fn map_sentiment_label(label: &str) -> Sentiment {
    match label.to_uppercase().as_str() {
        "LABEL_0" | "NEGATIVE" => Sentiment::Negative,
        "LABEL_2" | "POSITIVE" => Sentiment::Positive,
        _ => Sentiment::Neutral,
    }
}

/// Pick the top-scored label from a ranked classification response.
/// The endpoint returns one ranking per input; single-input requests
/// get a list of one ranking.
fn top_sentiment(rankings: &[Vec<LabelScore>]) -> Option<SentimentScore> {
    let ranking = rankings.first()?;

    ranking
        .iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|top| SentimentScore {
            sentiment: map_sentiment_label(&top.label),
            score: top.score,
        })
}

#[async_trait]
impl InferenceClient for HuggingFaceClient {
    async fn sentiment(&self, text: &str) -> Result<SentimentScore> {
        let request = TextRequest {
            inputs: text,
            parameters: None,
        };

        let rankings: Vec<Vec<LabelScore>> =
            self.post_model(&self.models.sentiment, &request).await?;

        top_sentiment(&rankings).ok_or_else(|| {
            AdvisorError::InferenceError(format!(
                "{} returned no labels",
                self.models.sentiment
            ))
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = TextRequest {
            inputs: prompt,
            parameters: Some(GenerationParameters {
                max_length: 500,
                temperature: 0.7,
                do_sample: true,
            }),
        };

        info!("Calling generation endpoint {}", self.models.generation);

        let outputs: Vec<GeneratedText> =
            self.post_model(&self.models.generation, &request).await?;

        let text = outputs
            .into_iter()
            .next()
            .map(|o| o.generated_text)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AdvisorError::InferenceError(format!(
                "{} returned empty text",
                self.models.generation
            )));
        }

        Ok(text)
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        let request = TextRequest {
            inputs: text,
            parameters: None,
        };

        let outputs: Vec<SummaryText> = self
            .post_model(&self.models.summarization, &request)
            .await?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text)
            .ok_or_else(|| {
                AdvisorError::InferenceError(format!(
                    "{} returned no summary",
                    self.models.summarization
                ))
            })
    }

    async fn answer(&self, question: &str, context: &str) -> Result<AnswerSpan> {
        let request = QaRequest {
            inputs: QaInputs { question, context },
        };

        let response: QaResponse = self
            .post_model(&self.models.question_answering, &request)
            .await?;

        Ok(AnswerSpan {
            answer: response.answer,
            score: response.score,
        })
    }

    async fn health_check(&self) -> bool {
        // A cheap sentiment probe doubles as the liveness check
        self.sentiment("ok").await.is_ok()
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = TextRequest {
            inputs: "What is an index fund?",
            parameters: Some(GenerationParameters {
                max_length: 500,
                temperature: 0.7,
                do_sample: true,
            }),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("What is an index fund?"));
        assert!(json.contains("max_length"));

        let plain = TextRequest {
            inputs: "hello",
            parameters: None,
        };
        let json = serde_json::to_string(&plain).unwrap();
        assert!(!json.contains("parameters"));
    }

    #[test]
    fn test_qa_request_serialization() {
        let request = QaRequest {
            inputs: QaInputs {
                question: "How much should I save?",
                context: "Save 20% of income.",
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["inputs"]["question"], "How much should I save?");
    }

    #[test]
    fn test_sentiment_response_parsing() {
        let raw = r#"[[
            {"label": "LABEL_0", "score": 0.1},
            {"label": "LABEL_1", "score": 0.2},
            {"label": "LABEL_2", "score": 0.7}
        ]]"#;

        let rankings: Vec<Vec<LabelScore>> = serde_json::from_str(raw).unwrap();
        let top = top_sentiment(&rankings).unwrap();
        assert_eq!(top.sentiment, Sentiment::Positive);
        assert!((top.score - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_named_label_mapping() {
        assert_eq!(map_sentiment_label("negative"), Sentiment::Negative);
        assert_eq!(map_sentiment_label("LABEL_1"), Sentiment::Neutral);
        assert_eq!(map_sentiment_label("POSITIVE"), Sentiment::Positive);
        assert_eq!(map_sentiment_label("unknown"), Sentiment::Neutral);
    }

    #[test]
    fn test_missing_credential_is_config_error() {
        let settings = InferenceSettings::default();
        let result = HuggingFaceClient::new(&settings, ModelCatalog::default());
        assert!(matches!(result, Err(AdvisorError::ConfigError(_))));
    }
}
