use finova::{
    advisor::Advisor,
    api::start_server,
    config::AdvisorConfig,
    inference::{HuggingFaceClient, InferenceClient},
    session::SessionStore,
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AdvisorConfig::from_env();

    let api_port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("API_PORT"))
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;

    info!("🚀 FINOVA - Financial Advisor API Server");
    info!("📍 Port: {}", api_port);

    // Build the advisor, falling back to rules-only when no credential
    // is configured
    let advisor = match HuggingFaceClient::new(&config.inference, config.models.clone()) {
        Ok(client) => {
            info!("🧠 Hosted inference enabled via {}", client.host());
            Advisor::new(config.clone(), Arc::new(client) as Arc<dyn InferenceClient>)
        }
        Err(e) => {
            warn!("⚠️  {}", e);
            warn!("📌 Continuing with rule-based advice only");
            Advisor::rules_only(config.clone())
        }
    };

    let sessions = SessionStore::new(config.max_transcript_turns);

    info!("✅ Advisor initialized");
    info!("📡 Starting API server...");

    // Start API server
    start_server(Arc::new(advisor), sessions, api_port).await?;

    Ok(())
}
