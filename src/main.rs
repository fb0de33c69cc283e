//! # Storefront API
//!
//! Entry point: sets up logging, loads configuration and serves the HTTP API.

use anyhow::Result;
use tracing::info;

use storefront_api::config::Settings;
use storefront_api::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;
    storefront_api::telemetry::init_tracing(&settings.environment);

    info!("Starting Storefront API...");
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        backend = ?settings.storage.backend,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
