//! kadro HR platform API server.
//!
//! Startup order matters: configuration is validated before anything else
//! so a missing secret stops the process instead of serving unverifiable
//! webhooks, then logging, then the database and migrations, then the
//! router.

mod config;
mod logging;
mod routes;
mod state;

use std::sync::Arc;

use kadro_db::{DbPool, PgRoleStore, PgTenantDirectory, PgUserStore, run_migrations};
use kadro_db::{RoleStore, TenantDirectory, UserStore};
use kadro_provisioning::ProvisioningEngine;
use kadro_webhook::WebhookVerifier;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: configuration error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.log_filter);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "server terminated");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = DbPool::connect(&config.database_url).await?;
    run_migrations(&db).await?;
    let pool = db.inner().clone();

    // An empty webhook secret is fatal here, before any delivery arrives.
    let verifier = WebhookVerifier::with_tolerance(
        config.webhook_signing_secret.as_bytes(),
        config.webhook_tolerance_secs,
    )?;

    let directory: Arc<dyn TenantDirectory> = Arc::new(PgTenantDirectory::new(pool.clone()));
    let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
    let roles: Arc<dyn RoleStore> = Arc::new(PgRoleStore::new(pool));
    let engine = Arc::new(ProvisioningEngine::new(
        directory.clone(),
        users.clone(),
        roles.clone(),
    ));

    let state = AppState::new(
        directory,
        users,
        roles,
        engine,
        verifier,
        config.session_signing_secret.as_bytes(),
        config.provider_jwt_public_key.as_bytes(),
    );

    let app = routes::router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "hr-api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("hr-api shut down cleanly");
    Ok(())
}

/// Resolve when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}
