use financial_advisor_api::{
    advisor::Advisor, api::start_server, classifier::RequestClassifier, config::AdvisorConfig,
    engine::build_engine,
};
use std::sync::Arc;
use tracing::info;
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

    let config = AdvisorConfig::from_env()?;

    info!("Financial Advisor - API Server");
    info!(?config, "Configuration loaded");

    let engine = build_engine(&config.engine)?;
    let advisor = Arc::new(Advisor::new(
        engine,
        RequestClassifier::new(config.classifier.clone()),
    ));

    start_server(advisor, &config.bind_addr()).await?;

    Ok(())
}
