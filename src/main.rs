//! Entry point for the payroll calculator service.
//!
//! Loads configuration, then serves the calculator API.

use site_payroll::api::{AppState, create_router};
use site_payroll::config::ConfigLoader;

/// Environment variable naming the configuration file.
const ENV_CONFIG_PATH: &str = "SITE_PAYROLL_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "./config/site-payroll.yaml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path =
        std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ConfigLoader::load(&config_path)
        .and_then(ConfigLoader::with_env_overrides)
        .map_err(|e| {
            tracing::error!("Configuration failed: {e}");
            e
        })?;

    let addr = config.server().bind_addr;
    tracing::info!(
        remote_api = %config.remote_api().base_url,
        numeric_input = %config.calculator().numeric_input,
        "Configuration ready"
    );

    let app = create_router(AppState::new(config));

    tracing::info!("Payroll calculator listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
