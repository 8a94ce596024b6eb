//! Startup shared by the three service binaries.
//!
//! # Startup Flow
//!
//! 1. Initialize logging
//! 2. Load the service's prefixed configuration
//! 3. Create the database pool and run migrations, or fall back to memory
//! 4. Build the HTTP router with routes and middleware
//! 5. Serve on the configured port until Ctrl+C

use std::sync::Arc;

use axum::Router;
use tracing_subscriber::EnvFilter;

use crate::{
    config::{Config, ServiceKind},
    db::{self, DbPool},
    repository::{
        memory::{MemoryAccountStore, MemoryCardStore, MemoryLoanStore},
        postgres::{PgAccountStore, PgCardStore, PgLoanStore},
    },
    routes,
    services::{
        account_service::AccountService, card_service::CardService, loan_service::LoanService,
    },
};

/// Initialize logging with tracing subscriber. Reads RUST_LOG (defaults to "info").
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
}

/// Run one service until it is interrupted.
pub async fn run(service: ServiceKind) -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env(service)?;
    tracing::info!(service = service.name(), "Configuration loaded");

    let pool = match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url, config.max_connections).await?;
            tracing::info!("Database pool created");

            db::run_migrations(&pool, service).await?;
            tracing::info!("Database migrations complete");

            Some(pool)
        }
        None => {
            tracing::warn!(
                "{}DATABASE_URL is not set, data is kept in memory and lost on exit",
                service.env_prefix()
            );
            None
        }
    };

    let app = build_router(&config, pool);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Router of `config.service` backed by Postgres when a pool is given.
pub fn build_router(config: &Config, pool: Option<DbPool>) -> Router {
    match config.service {
        ServiceKind::Accounts => {
            let service = match pool {
                Some(pool) => AccountService::new(Arc::new(PgAccountStore::new(pool))),
                None => AccountService::new(Arc::new(MemoryAccountStore::new())),
            };
            routes::accounts_router(service, config)
        }
        ServiceKind::Cards => {
            let service = match pool {
                Some(pool) => CardService::new(Arc::new(PgCardStore::new(pool))),
                None => CardService::new(Arc::new(MemoryCardStore::new())),
            };
            routes::cards_router(service, config)
        }
        ServiceKind::Loans => {
            let service = match pool {
                Some(pool) => LoanService::new(Arc::new(PgLoanStore::new(pool))),
                None => LoanService::new(Arc::new(MemoryLoanStore::new())),
            };
            routes::loans_router(service, config)
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
