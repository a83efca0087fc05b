//! Credit Decision Service entry point

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use credit_decision_service::config::{Config, LogFormat};
use credit_decision_service::lifecycle::Initializing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    init_tracing(config.log_format);

    tracing::info!("Credit Decision Service starting...");
    tracing::info!(
        environment = %config.environment,
        model = %config.model_path.display(),
        scaler = %config.scaler_path.display(),
        variant = %config.variant,
        "Configuration loaded"
    );

    let service = Initializing::new(config)
        .load_artifacts()
        .context("Failed to load model artifacts")?;

    service.serve().await.context("Server error")
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "credit_decision_service=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
