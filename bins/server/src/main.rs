//! Tally API Server
//!
//! Main entry point for the Tally backend service.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tally_api::{AppState, create_router};
use sea_orm::DatabaseConnection;
use tally_db::{SessionRepository, connect_with, migration::Migrator};
use tally_shared::{AppConfig, GoogleVerifier, JwtConfig, JwtService};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tally=debug,tally_api=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Periodically deletes expired session rows.
fn spawn_session_sweeper(db: DatabaseConnection) {
    tokio::spawn(async move {
        let repo = SessionRepository::new(db);
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            match repo.delete_expired().await {
                Ok(0) => {}
                Ok(deleted) => info!(deleted, "Expired sessions removed"),
                Err(e) => tracing::warn!(error = %e, "Failed to sweep expired sessions"),
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;

    spawn_session_sweeper(db.clone());

    anyhow::ensure!(
        config.jwt.access_token_expiry_secs > 0,
        "jwt.access_token_expiry_secs must be positive"
    );
    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_secs: i64::try_from(config.jwt.access_token_expiry_secs)
            .context("jwt.access_token_expiry_secs is too large")?,
    });

    if config.google.client_id.is_empty() {
        tracing::warn!("google.client_id is not set; Google sign-in will be refused");
    }

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        identity_verifier: Arc::new(GoogleVerifier::new(config.google.clone())),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
