//! Claims Intake - API Server Binary
//!
//! This binary starts the HTTP API server for claim submission and lookup.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin claims-api
//!
//! # Run with environment variables
//! CLAIMS_PORT=9000 CLAIMS_DATABASE_URL=sqlite://claims.db cargo run --bin claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `CLAIMS_HOST` - Server host (default: 0.0.0.0)
//! * `CLAIMS_PORT` - Server port (default: 8080)
//! * `CLAIMS_DATABASE_URL` - SQLite connection string (default: sqlite://claims.db)
//! * `CLAIMS_MAX_CONNECTIONS` - Pool size (default: 5)
//! * `CLAIMS_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `CLAIMS_LOG_JSON` - Emit JSON log lines (default: false)
//! * `CLAIMS_BENEFIT_LIMIT` - Partial coverage threshold (default: 40000)
//! * `CLAIMS_FRAUD_MULTIPLIER` - Fraud flag multiplier (default: 2)
//! * `CLAIMS_ACTIVE_MEMBERS` - Comma separated active member ids (default: M123)

use anyhow::Context;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_db::{create_pool, ensure_schema};
use interface_api::{config::ApiConfig, create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, opens the database and starts
/// the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The database cannot be opened or its schema created
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid CLAIMS_* configuration")?;

    init_tracing(&config.log_level, config.log_json);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        benefit_limit = %config.benefit_limit,
        fraud_multiplier = %config.fraud_multiplier,
        active_members = config.active_members.len(),
        "Starting claims intake API server"
    );

    let pool = create_pool(config.database_config())
        .await
        .context("failed to open claims database")?;

    ensure_schema(&pool)
        .await
        .context("failed to create claims schema")?;

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server_addr()))?;

    let app = create_router(AppState::new(pool.clone(), config));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
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
