use digital_banking_assistant::{api::start_server, banking::BankingService, config::AppConfig};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    if config.gemini_api_key.is_empty() {
        warn!("GEMINI_API_KEY not set; the assistant will answer with its fallback message");
    }

    info!("Digital Banking - API Server");
    info!("Port: {}", config.api_port);
    info!("Assistant model: {}", config.gemini_model);

    let service = Arc::new(BankingService::from_config(&config)?);

    info!("Banking service initialized");

    start_server(service, config.api_port).await?;

    Ok(())
}
