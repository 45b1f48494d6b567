use chrono::Utc;
use finova::{
    advisor::Advisor,
    config::AdvisorConfig,
    inference::MockClient,
    models::{ExpenseCategory, GoalTag, RiskTolerance, UserProfile, UserType},
    report,
    score,
    session::Session,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("FINOVA advisor demo starting");

    let config = AdvisorConfig::default();
    let advisor = Advisor::new(config.clone(), Arc::new(MockClient::new()));

    // Sample session with a profile and itemized expenses
    let mut session = Session::new(Uuid::new_v4(), config.max_transcript_turns);
    let profile = UserProfile {
        name: "Alex Morgan".to_string(),
        age: 28,
        monthly_income: 5000.0,
        occupation: "Software Engineer".to_string(),
        user_type: UserType::Professional,
        risk_tolerance: RiskTolerance::Medium,
        savings_balance: 12_000.0,
        debt_balance: 6_000.0,
        monthly_expenses: 0.0,
        goals: [GoalTag::EmergencyFund, GoalTag::Retirement, GoalTag::BuyAHouse]
            .into_iter()
            .collect::<BTreeSet<_>>(),
        created_at: Utc::now(),
    };
    session.profile = Some(profile.clone());

    session.ledger.add(ExpenseCategory::Housing, 1500.0)?;
    session.ledger.add(ExpenseCategory::Food, 600.0)?;
    session.ledger.add(ExpenseCategory::Transportation, 300.0)?;
    session.ledger.add(ExpenseCategory::Entertainment, 250.0)?;

    info!(session = %session.tag, "Running sample conversation");

    let questions = [
        "How should I budget my money each month?",
        "Should I invest in index funds?",
        "I'm worried about my credit card debt",
    ];

    for question in questions {
        let reply = advisor.chat(&mut session, question).await?;
        println!("\n=== Q: {} ===", question);
        println!("[intent: {} | sentiment: {:?} | source: {:?}]", reply.intent, reply.sentiment, reply.source);
        println!("{}", reply.answer);
    }

    let health = score::health_score(&profile, &session.ledger, &advisor.config().rules);

    println!("\n=== FINANCIAL HEALTH ===");
    println!("Score: {}/100 (Grade: {})", health.total, health.grade);
    for item in &health.feedback {
        println!("  - {}", item);
    }

    println!("\n=== MONTHLY REPORT ===");
    println!(
        "{}",
        report::monthly_report(&profile, &session.ledger, &advisor.config().rules, Utc::now())
    );

    Ok(())
}
