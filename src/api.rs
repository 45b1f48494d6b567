//! REST API server for the financial advisor
//!
//! Exposes sessions, profile entry, expense tracking, chat, scoring,
//! reports, chart data, and calculators over HTTP. Integrates with a
//! frontend UI.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use uuid::Uuid;

use crate::advisor::Advisor;
use crate::calc;
use crate::charts;
use crate::error::AdvisorError;
use crate::expenses;
use crate::models::{
    parse_category, parse_goal, parse_risk, parse_user_type, UserProfile,
};
use crate::report;
use crate::score;
use crate::session::SessionStore;
use crate::validate;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub session_id: Option<String>,
    pub name: String,
    pub age: u32,
    pub monthly_income: f64,
    #[serde(default)]
    pub occupation: String,
    pub user_type: String,
    pub risk_tolerance: String,
    #[serde(default)]
    pub savings_balance: f64,
    #[serde(default)]
    pub debt_balance: f64,
    #[serde(default)]
    pub monthly_expenses: f64,
    #[serde(default)]
    pub goals: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExpenseRequest {
    pub session_id: Option<String>,
    /// Explicit category; when absent the description is auto-categorized
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub session_id: Option<String>,
    pub question: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorRequest {
    CompoundInterest {
        principal: f64,
        annual_rate: f64,
        years: f64,
        frequency: Option<u32>,
    },
    LoanPayment {
        principal: f64,
        annual_rate: f64,
        years: u32,
    },
    DebtToIncome {
        monthly_debt_payments: f64,
        monthly_income: f64,
    },
    RetirementNeeds {
        annual_income: f64,
        replacement_ratio: Option<f64>,
    },
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

fn error_status(e: &AdvisorError) -> StatusCode {
    match e {
        AdvisorError::InvalidInput(_) | AdvisorError::UnknownSession(_) => {
            StatusCode::BAD_REQUEST
        }
        AdvisorError::ModelLoading(_) | AdvisorError::ConfigError(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub advisor: Arc<Advisor>,
    pub sessions: SessionStore,
}

/// =============================
/// Helpers — String → ID Parsing
/// =============================

fn stable_uuid_from_string(input: &str) -> Uuid {
    use sha2::{Digest, Sha256};

    let hash = Sha256::digest(input.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);

    // Set UUID version (4) and variant (RFC4122) bits.
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}

/// Resolve a caller-supplied session id: parse as uuid, hash anything
/// else to a stable uuid, and mint a fresh one when absent.
fn resolve_session_id(value: Option<&str>) -> Uuid {
    match value {
        Some(v) if !v.trim().is_empty() => {
            Uuid::parse_str(v).unwrap_or_else(|_| stable_uuid_from_string(v))
        }
        _ => Uuid::new_v4(),
    }
}

fn parse_path_session(session_id: &str) -> Uuid {
    Uuid::parse_str(session_id).unwrap_or_else(|_| stable_uuid_from_string(session_id))
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Session Endpoint
/// =============================

async fn create_session(
    State(state): State<ApiState>,
    Json(req): Json<SessionRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = resolve_session_id(req.session_id.as_deref());
    let session = state.sessions.load_or_create(session_id).await;

    info!(session = %session.tag, "Session created");

    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "session_id": session.session_id,
            "tag": session.tag,
            "created_at": session.created_at,
        }))),
    )
}

/// =============================
/// Profile Endpoint
/// =============================

async fn upsert_profile(
    State(state): State<ApiState>,
    Json(req): Json<ProfileRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = resolve_session_id(req.session_id.as_deref());

    let goals: BTreeSet<_> = req.goals.iter().filter_map(|g| parse_goal(g)).collect();

    let profile = UserProfile {
        name: req.name,
        age: req.age,
        monthly_income: req.monthly_income,
        occupation: req.occupation,
        user_type: parse_user_type(&req.user_type),
        risk_tolerance: parse_risk(&req.risk_tolerance),
        savings_balance: req.savings_balance,
        debt_balance: req.debt_balance,
        monthly_expenses: req.monthly_expenses,
        goals,
        created_at: Utc::now(),
    };

    let issues = validate::validate_profile(&profile);
    if !issues.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(issues.join("; "))),
        );
    }

    let mut session = state.sessions.load_or_create(session_id).await;
    session.profile = Some(profile.clone());

    let health = score::health_score(
        &profile,
        &session.ledger,
        &state.advisor.config().rules,
    );

    info!(session = %session.tag, score = health.total, "Profile stored");
    state.sessions.save(session).await;

    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "session_id": session_id,
            "profile": profile,
            "score": health,
        }))),
    )
}

/// =============================
/// Expense Endpoints
/// =============================

async fn add_expense(
    State(state): State<ApiState>,
    Json(req): Json<ExpenseRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = resolve_session_id(req.session_id.as_deref());
    let mut session = state.sessions.load_or_create(session_id).await;

    let category = match (&req.category, &req.description) {
        (Some(c), _) => match parse_category(c) {
            Some(category) => category,
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(format!("Unknown category: {}", c))),
                )
            }
        },
        (None, Some(description)) => expenses::categorize(description),
        (None, None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "Provide a category or a description".to_string(),
                )),
            )
        }
    };

    if let Err(e) = session.ledger.add(category, req.amount) {
        return (error_status(&e), Json(ApiResponse::error(e.to_string())));
    }

    let analysis = expenses::analyze(&session.ledger);
    let ledger = session.ledger.clone();
    state.sessions.save(session).await;

    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "session_id": session_id,
            "category": category,
            "ledger": ledger,
            "analysis": analysis,
        }))),
    )
}

async fn clear_expenses(
    State(state): State<ApiState>,
    Json(req): Json<SessionRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = resolve_session_id(req.session_id.as_deref());
    let mut session = state.sessions.load_or_create(session_id).await;

    session.ledger.clear();
    state.sessions.save(session).await;

    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "session_id": session_id,
            "cleared": true,
        }))),
    )
}

/// =============================
/// Chat Endpoint
/// =============================

async fn chat_handler(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = resolve_session_id(req.session_id.as_deref());
    let mut session = state.sessions.load_or_create(session_id).await;

    match state.advisor.chat(&mut session, &req.message).await {
        Ok(reply) => {
            let transcript_len = session.transcript.len();
            state.sessions.save(session).await;

            (
                StatusCode::OK,
                Json(ApiResponse::success(serde_json::json!({
                    "session_id": session_id,
                    "answer": reply.answer,
                    "intent": reply.intent,
                    "sentiment": reply.sentiment,
                    "source": reply.source,
                    "transcript_len": transcript_len,
                }))),
            )
        }
        Err(e) => (error_status(&e), Json(ApiResponse::error(e.to_string()))),
    }
}

/// =============================
/// Ask / Summary Endpoints
/// =============================

async fn ask_handler(
    State(state): State<ApiState>,
    Json(req): Json<AskRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = resolve_session_id(req.session_id.as_deref());

    let session = match state.sessions.get(session_id).await {
        Ok(session) => session,
        Err(e) => return (error_status(&e), Json(ApiResponse::error(e.to_string()))),
    };

    match state.advisor.answer_about_finances(&session, &req.question).await {
        Ok(span) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({
                "answer": span.answer,
                "score": span.score,
            }))),
        ),
        Err(e) => (error_status(&e), Json(ApiResponse::error(e.to_string()))),
    }
}

async fn get_summary(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = parse_path_session(&session_id);

    let session = match state.sessions.get(session_id).await {
        Ok(session) => session,
        Err(e) => return (error_status(&e), Json(ApiResponse::error(e.to_string()))),
    };

    match state.advisor.summarize_transcript(&session).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({
                "summary": summary,
            }))),
        ),
        Err(e) => (error_status(&e), Json(ApiResponse::error(e.to_string()))),
    }
}

/// =============================
/// Score / Report / Charts
/// =============================

async fn get_score(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = parse_path_session(&session_id);

    let session = match state.sessions.get(session_id).await {
        Ok(session) => session,
        Err(e) => return (error_status(&e), Json(ApiResponse::error(e.to_string()))),
    };

    let Some(profile) = &session.profile else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "Complete the profile before requesting a score".to_string(),
            )),
        );
    };

    let health = score::health_score(
        profile,
        &session.ledger,
        &state.advisor.config().rules,
    );

    (StatusCode::OK, Json(ApiResponse::success(health)))
}

async fn get_report(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = parse_path_session(&session_id);

    let session = match state.sessions.get(session_id).await {
        Ok(session) => session,
        Err(e) => return (error_status(&e), Json(ApiResponse::error(e.to_string()))),
    };

    let Some(profile) = &session.profile else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "Complete the profile before requesting a report".to_string(),
            )),
        );
    };

    let markdown = report::monthly_report(
        profile,
        &session.ledger,
        &state.advisor.config().rules,
        Utc::now(),
    );

    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "report": markdown,
        }))),
    )
}

async fn get_charts(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = parse_path_session(&session_id);

    let session = match state.sessions.get(session_id).await {
        Ok(session) => session,
        Err(e) => return (error_status(&e), Json(ApiResponse::error(e.to_string()))),
    };

    let breakdown = charts::expense_breakdown(&session.ledger);

    let projection = session.profile.as_ref().map(|profile| {
        let surplus = profile.monthly_income
            - score::effective_monthly_expenses(profile, &session.ledger);
        charts::savings_projection(
            profile.savings_balance,
            surplus,
            &state.advisor.config().projection,
        )
    });

    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "expense_breakdown": breakdown,
            "savings_projection": projection,
        }))),
    )
}

/// =============================
/// Calculator Endpoint
/// =============================

async fn run_calculator(
    Json(req): Json<CalculatorRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let data = match req {
        CalculatorRequest::CompoundInterest {
            principal,
            annual_rate,
            years,
            frequency,
        } => {
            let future_value =
                calc::compound_interest(principal, annual_rate, years, frequency.unwrap_or(12));
            serde_json::json!({
                "future_value": future_value,
                "total_growth": future_value - principal,
            })
        }
        CalculatorRequest::LoanPayment {
            principal,
            annual_rate,
            years,
        } => {
            let payment = calc::loan_payment(principal, annual_rate, years);
            let total_paid = payment * years as f64 * 12.0;
            serde_json::json!({
                "monthly_payment": payment,
                "total_interest": total_paid - principal,
            })
        }
        CalculatorRequest::DebtToIncome {
            monthly_debt_payments,
            monthly_income,
        } => match calc::debt_to_income(monthly_debt_payments, monthly_income) {
            Some(ratio) => serde_json::json!({ "ratio": ratio }),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(
                        "Debt-to-income ratio is undefined without income".to_string(),
                    )),
                )
            }
        },
        CalculatorRequest::RetirementNeeds {
            annual_income,
            replacement_ratio,
        } => {
            let needs =
                calc::retirement_needs(annual_income, replacement_ratio.unwrap_or(0.8));
            serde_json::json!({ "retirement_needs": needs })
        }
    };

    (StatusCode::OK, Json(ApiResponse::success(data)))
}

/// =============================
/// Router
/// =============================

pub fn create_router(advisor: Arc<Advisor>, sessions: SessionStore) -> Router {
    let state = ApiState { advisor, sessions };

    Router::new()
        .route("/health", get(health))
        .route("/api/session", post(create_session))
        .route("/api/profile", post(upsert_profile))
        .route("/api/expenses", post(add_expense))
        .route("/api/expenses/clear", post(clear_expenses))
        .route("/api/chat", post(chat_handler))
        .route("/api/ask", post(ask_handler))
        .route("/api/summary/:session_id", get(get_summary))
        .route("/api/score/:session_id", get(get_score))
        .route("/api/report/:session_id", get(get_report))
        .route("/api/charts/:session_id", get(get_charts))
        .route("/api/calculator", post(run_calculator))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    advisor: Arc<Advisor>,
    sessions: SessionStore,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(advisor, sessions);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_uuid_is_deterministic() {
        let a = stable_uuid_from_string("browser-session-1");
        let b = stable_uuid_from_string("browser-session-1");
        let c = stable_uuid_from_string("browser-session-2");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.get_version_num(), 4);
    }

    #[test]
    fn test_resolve_session_id() {
        let known = Uuid::new_v4();
        assert_eq!(resolve_session_id(Some(&known.to_string())), known);

        // Non-uuid strings hash stably
        assert_eq!(
            resolve_session_id(Some("alpha")),
            resolve_session_id(Some("alpha"))
        );

        // Absent or blank ids mint fresh uuids
        assert_ne!(resolve_session_id(None), resolve_session_id(None));
    }

    #[test]
    fn test_calculator_request_deserialization() {
        let raw = r#"{
            "calculator": "loan_payment",
            "principal": 200000,
            "annual_rate": 0.04,
            "years": 30
        }"#;

        let req: CalculatorRequest = serde_json::from_str(raw).unwrap();
        assert!(matches!(req, CalculatorRequest::LoanPayment { .. }));
    }
}
