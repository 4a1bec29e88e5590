//! Courier - Main Entry Point
//!
//! Loads the configuration, installs logging, then runs the controller and
//! the console front-end until the user quits.

mod config;

use std::sync::Arc;

use courier_infrastructure::ReqwestHttpClient;
use courier_ui::{Controller, ControllerHandle, console};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    // Logs go to stderr, stdout belongs to the console
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Courier v{}", env!("CARGO_PKG_VERSION"));

    let client = ReqwestHttpClient::with_settings(&config.client_settings())?;
    let ControllerHandle {
        commands,
        updates,
        task,
    } = Controller::spawn(Arc::new(client));

    console::run(commands, updates).await?;
    task.await?;

    info!("Courier stopped");
    Ok(())
}
