use menu_service::config::MenuConfig;
use menu_service::services::init_metrics;
use menu_service::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = MenuConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "menu-service",
        &config.logging.level,
        config.logging.otlp_endpoint.as_deref(),
    );

    // Must run before the first request records anything
    init_metrics()?;

    tracing::info!(
        environment = %config.environment,
        storage = ?config.storage.backend,
        "Starting menu-service"
    );

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
