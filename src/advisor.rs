//! Chat pipeline
//!
//! Runs one conversational turn: sanitize input, analyze sentiment (hosted
//! endpoint with rule-based fallback), classify intent, render advice, and
//! append both turns to the session transcript. The inference client is an
//! injected capability; without one the advisor runs rules-only.

use crate::advice;
use crate::classifier::{lexicon_sentiment, Intent, IntentClassifier};
use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::inference::{AnswerSpan, InferenceClient};
use crate::models::{AnswerSource, ChatReply, ChatRole, Sentiment, UserProfile};
use crate::report;
use crate::session::{ChatTurn, Session};
use crate::validate::sanitize_input;
use crate::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Generated answers shorter than this are considered unusable and the
/// templated advice is used instead.
const MIN_GENERATED_LEN: usize = 40;

pub struct Advisor {
    client: Option<Arc<dyn InferenceClient>>,
    config: AdvisorConfig,
}

impl Advisor {
    pub fn new(config: AdvisorConfig, client: Arc<dyn InferenceClient>) -> Self {
        Self {
            client: Some(client),
            config,
        }
    }

    /// Advisor without a hosted backend; sentiment and advice come from
    /// the rule-based paths only.
    pub fn rules_only(config: AdvisorConfig) -> Self {
        Self {
            client: None,
            config,
        }
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Run one chat turn against a session
    pub async fn chat(&self, session: &mut Session, raw_input: &str) -> Result<ChatReply> {
        let input = sanitize_input(raw_input);
        if input.is_empty() {
            return Err(AdvisorError::InvalidInput(
                "message is empty after sanitization".to_string(),
            ));
        }

        session.transcript.push(ChatTurn::user(input.clone()));

        let sentiment = self.sentiment_of(&input).await;
        let intent = IntentClassifier::classify(&input);

        info!(
            session = %session.tag,
            ?intent,
            ?sentiment,
            "Handling chat turn"
        );

        let (answer, source) = match &session.profile {
            None => (advice::ONBOARDING_MESSAGE.to_string(), AnswerSource::Rules),
            Some(profile) => {
                let templated =
                    advice::advise(profile, &session.ledger, intent, sentiment, &self.config);
                self.augment(profile, &input, intent, sentiment, templated)
                    .await
            }
        };

        session.transcript.push(ChatTurn::assistant(answer.clone()));

        Ok(ChatReply {
            answer,
            intent,
            sentiment,
            source,
        })
    }

    /// Summarize the session transcript via the hosted summarization
    /// endpoint. Requires a configured backend.
    pub async fn summarize_transcript(&self, session: &Session) -> Result<String> {
        let client = self.require_client()?;

        if session.transcript.is_empty() {
            return Err(AdvisorError::InvalidInput(
                "transcript is empty".to_string(),
            ));
        }

        let text: String = session
            .transcript
            .turns()
            .map(|turn| {
                let role = match turn.role {
                    ChatRole::User => "User",
                    ChatRole::Assistant => "Advisor",
                };
                format!("{}: {}\n", role, turn.text)
            })
            .collect();

        client.summarize(&text).await
    }

    /// Answer a free-form question against the session's monthly report
    /// via the hosted question-answering endpoint.
    pub async fn answer_about_finances(
        &self,
        session: &Session,
        question: &str,
    ) -> Result<AnswerSpan> {
        let client = self.require_client()?;

        let profile = session.profile.as_ref().ok_or_else(|| {
            AdvisorError::InvalidInput("complete the profile before asking".to_string())
        })?;

        let question = sanitize_input(question);
        if question.is_empty() {
            return Err(AdvisorError::InvalidInput(
                "question is empty after sanitization".to_string(),
            ));
        }

        let context =
            report::monthly_report(profile, &session.ledger, &self.config.rules, Utc::now());

        client.answer(&question, &context).await
    }

    fn require_client(&self) -> Result<&Arc<dyn InferenceClient>> {
        self.client.as_ref().ok_or_else(|| {
            AdvisorError::ConfigError("no inference backend configured".to_string())
        })
    }

    async fn sentiment_of(&self, input: &str) -> Sentiment {
        match &self.client {
            Some(client) => match client.sentiment(input).await {
                Ok(scored) => scored.sentiment,
                Err(e) => {
                    warn!("Sentiment endpoint failed, using lexicon fallback: {}", e);
                    lexicon_sentiment(input)
                }
            },
            None => lexicon_sentiment(input),
        }
    }

    /// Ask the generation endpoint for a personalized answer; fall back to
    /// the templated advice when the call fails or yields nothing usable.
    async fn augment(
        &self,
        profile: &UserProfile,
        input: &str,
        intent: Intent,
        sentiment: Sentiment,
        templated: String,
    ) -> (String, AnswerSource) {
        let Some(client) = &self.client else {
            return (templated, AnswerSource::Rules);
        };

        let prompt = build_generation_prompt(profile, input, intent, sentiment);

        match client.generate(&prompt).await {
            Ok(text) if text.trim().len() >= MIN_GENERATED_LEN => {
                (text.trim().to_string(), AnswerSource::Inference)
            }
            Ok(_) => {
                warn!("Generation endpoint returned unusable text, using templates");
                (templated, AnswerSource::Rules)
            }
            Err(e) => {
                warn!("Generation endpoint failed, using templates: {}", e);
                (templated, AnswerSource::Rules)
            }
        }
    }
}

/// Prompt context for the hosted generation model
fn build_generation_prompt(
    profile: &UserProfile,
    input: &str,
    intent: Intent,
    sentiment: Sentiment,
) -> String {
    let goals: Vec<String> = profile.goals.iter().map(|g| g.to_string()).collect();

    format!(
        "User Profile:\n\
         - Name: {}\n\
         - Age: {}\n\
         - Monthly Income: ${:.2}\n\
         - Occupation: {}\n\
         - User Type: {}\n\
         - Risk Tolerance: {}\n\
         - Current Savings: ${:.2}\n\
         - Monthly Expenses: ${:.2}\n\
         - Goals: {}\n\n\
         User Question: {}\n\
         Intent: {}\n\
         Sentiment: {:?}\n\n\
         Provide personalized financial advice considering the user's profile \
         and current situation.",
        profile.name,
        profile.age,
        profile.monthly_income,
        profile.occupation,
        profile.user_type,
        profile.risk_tolerance,
        profile.savings_balance,
        profile.monthly_expenses,
        goals.join(", "),
        input,
        intent,
        sentiment,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::MockClient;
    use crate::models::{GoalTag, RiskTolerance, UserType};
    use chrono::Utc;
    use std::collections::BTreeSet;
    use uuid::Uuid;

    fn session_with_profile() -> Session {
        let mut session = Session::new(Uuid::new_v4(), 50);
        session.profile = Some(UserProfile {
            name: "Casey".to_string(),
            age: 29,
            monthly_income: 5200.0,
            occupation: "Designer".to_string(),
            user_type: UserType::Professional,
            risk_tolerance: RiskTolerance::Medium,
            savings_balance: 9000.0,
            debt_balance: 1500.0,
            monthly_expenses: 3100.0,
            goals: [GoalTag::EmergencyFund].into_iter().collect::<BTreeSet<_>>(),
            created_at: Utc::now(),
        });
        session
    }

    #[tokio::test]
    async fn test_onboarding_without_profile() {
        let advisor = Advisor::rules_only(AdvisorConfig::default());
        let mut session = Session::new(Uuid::new_v4(), 50);

        let reply = advisor.chat(&mut session, "help me budget").await.unwrap();
        assert!(reply.answer.contains("complete your profile"));
        assert_eq!(reply.source, AnswerSource::Rules);
        assert_eq!(session.transcript.len(), 2);
    }

    #[tokio::test]
    async fn test_rules_only_chat() {
        let advisor = Advisor::rules_only(AdvisorConfig::default());
        let mut session = session_with_profile();

        let reply = advisor
            .chat(&mut session, "how should I budget my money?")
            .await
            .unwrap();

        assert_eq!(reply.intent, Intent::Budgeting);
        assert_eq!(reply.source, AnswerSource::Rules);
        assert!(reply.answer.contains("Budgeting Advice"));
    }

    #[tokio::test]
    async fn test_inference_augmented_chat() {
        let advisor = Advisor::new(AdvisorConfig::default(), Arc::new(MockClient::new()));
        let mut session = session_with_profile();

        let reply = advisor
            .chat(&mut session, "should I invest in stocks?")
            .await
            .unwrap();

        assert_eq!(reply.intent, Intent::Investment);
        assert_eq!(reply.source, AnswerSource::Inference);
    }

    #[tokio::test]
    async fn test_unhealthy_backend_falls_back_to_rules() {
        let advisor = Advisor::new(AdvisorConfig::default(), Arc::new(MockClient::unhealthy()));
        let mut session = session_with_profile();

        let reply = advisor
            .chat(&mut session, "how do I pay off my loan debt?")
            .await
            .unwrap();

        assert_eq!(reply.intent, Intent::Debt);
        assert_eq!(reply.source, AnswerSource::Rules);
        assert!(reply.answer.contains("Debt Management Strategy"));
    }

    #[tokio::test]
    async fn test_empty_input_rejected() {
        let advisor = Advisor::rules_only(AdvisorConfig::default());
        let mut session = session_with_profile();

        let result = advisor.chat(&mut session, "  <>&\"' ").await;
        assert!(matches!(result, Err(AdvisorError::InvalidInput(_))));
        // Nothing was appended for the rejected turn
        assert_eq!(session.transcript.len(), 0);
    }

    #[tokio::test]
    async fn test_transcript_is_bounded() {
        let advisor = Advisor::rules_only(AdvisorConfig::default());

        let mut session = Session::new(Uuid::new_v4(), 4);
        session.profile = session_with_profile().profile;

        for _ in 0..5 {
            advisor
                .chat(&mut session, "what about my budget?")
                .await
                .unwrap();
        }

        assert_eq!(session.transcript.len(), 4);
    }

    #[tokio::test]
    async fn test_summarize_transcript() {
        let advisor = Advisor::new(AdvisorConfig::default(), Arc::new(MockClient::new()));
        let mut session = session_with_profile();

        advisor.chat(&mut session, "how do I budget?").await.unwrap();
        let summary = advisor.summarize_transcript(&session).await.unwrap();
        assert!(!summary.is_empty());

        // Rules-only advisors have no summarization capability
        let offline = Advisor::rules_only(AdvisorConfig::default());
        assert!(matches!(
            offline.summarize_transcript(&session).await,
            Err(AdvisorError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_answer_about_finances() {
        let advisor = Advisor::new(AdvisorConfig::default(), Arc::new(MockClient::new()));
        let session = session_with_profile();

        let span = advisor
            .answer_about_finances(&session, "what is my net cash flow?")
            .await
            .unwrap();
        assert!(!span.answer.is_empty());

        // No profile means nothing to ground the answer in
        let bare = Session::new(Uuid::new_v4(), 50);
        assert!(matches!(
            advisor.answer_about_finances(&bare, "anything").await,
            Err(AdvisorError::InvalidInput(_))
        ));
    }
}
