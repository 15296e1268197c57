//! Insurance Quoting - API Server Binary
//!
//! This binary starts the HTTP API server for the insurance quoting service.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin insurance-api
//!
//! # Run with environment variables
//! API_PORT=8080 API_JWT_SECRET=... API_QUEUE_URL=memory cargo run --bin insurance-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - HS256 token secret (required in production)
//! * `API_REQUIRED_SCOPE` - Scope every token must grant, e.g. `API.Access`
//! * `API_QUEUE_URL` - Azure queue URL with SAS token, or `memory` for the in-process queue
//! * `API_QUEUE_TIMEOUT_SECS` - Queue request timeout (default: 10)
//! * `API_SEED_DEMO_DATA` - Start with the demo policy for "user 01" (default: true)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use interface_api::{build_service, config::ApiConfig, create_router};
use anyhow::Context;
use domain_insurance::{PolicyNotifier, QueueConsumer};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, wires the insurance service,
/// and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment or is invalid
/// - The queue URL is unusable
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("loading API configuration")?;

    init_tracing(&config.log_level);

    config.validate()?;
    if config.uses_dev_secret() {
        tracing::warn!("API_JWT_SECRET not set; accepting tokens signed with the development secret");
    }

    tracing::info!(
        host = %config.host,
        port = %config.port,
        seed_demo_data = config.seed_demo_data,
        "Starting insurance quoting API server"
    );

    let (service, consumer) = build_service(&config)?;
    match service.notifier() {
        Some(notifier) => tracing::info!(queue = notifier.name(), "Purchase queue enabled"),
        None => tracing::info!("No purchase queue configured"),
    }
    if let Some(consumer) = consumer {
        tokio::spawn(drain_in_process_queue(consumer));
    }

    let app = create_router(service, config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Logs every message put on the in-process queue.
///
/// Stands in for the downstream consumer when no external queue is used.
async fn drain_in_process_queue(consumer: QueueConsumer) {
    consumer
        .run(|message| async move {
            tracing::info!(target: "purchase_queue", %message, "Purchase dequeued");
        })
        .await;
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
