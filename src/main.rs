//! Savora Back-Office Sync — realtime notification client daemon.
//!
//! Main entry point that wires the gateway, the alert sink, and the sync
//! orchestrator together and runs until a shutdown signal arrives.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use savora_api::BackofficeClient;
use savora_core::config::AppConfig;
use savora_core::error::AppError;
use savora_entity::AuthSession;
use savora_realtime::SyncOrchestrator;

mod notifier;

use notifier::LogNotifier;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Sync client error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("SAVORA_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main client run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Savora sync client v{}", env!("CARGO_PKG_VERSION"));

    let session = AuthSession::from_config(&config.session)?;
    tracing::info!(
        restaurant = %session.restaurant_id,
        staff = %session.staff_id,
        roles = %session.roles_param(),
        "Session loaded"
    );

    let gateway = Arc::new(BackofficeClient::new(&config.api, &session)?);
    let notifier = Arc::new(LogNotifier);

    let sync = SyncOrchestrator::new(
        &config.api,
        config.realtime.clone(),
        config.alerts.clone(),
        session,
        gateway,
        notifier,
    );
    sync.start().await;

    // Seed the history list so the dashboard has something on first paint.
    if let Err(e) = sync.store().fetch(false).await {
        tracing::warn!("Initial history fetch failed: {}", e);
    }

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, starting graceful shutdown...");

    sync.shutdown().await;
    tracing::info!("Savora sync client shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
