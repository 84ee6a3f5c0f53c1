//! Roster engine HTTP server.
//!
//! Reads `ROSTER_CONFIG_DIR` (default `./config/default`) and `ROSTER_BIND`
//! (default `0.0.0.0:3000`), seeds an in-memory store from the configuration
//! directory and serves the API.

use std::env;

use roster_engine::api::{AppState, create_router};
use roster_engine::config::ConfigLoader;
use roster_engine::schedule::ScheduleService;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir = env::var("ROSTER_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind = env::var("ROSTER_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    let employees = ConfigLoader::load_employees(&config_dir)?;
    info!(
        config_dir = %config_dir,
        templates = config.templates().len(),
        employees = employees.len(),
        "Configuration loaded"
    );

    let state = AppState::new(ScheduleService::from_config(&config, employees));
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(bind = %bind, "Roster engine listening");
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
