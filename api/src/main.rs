//! Account service API server
//!
//! Loads configuration, installs tracing, wires the stores selected by
//! `database.backend` into the services and serves the HTTP API until
//! SIGINT/SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::{bail, Context};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use acct_api::{create_app, AppState};
use acct_core::repositories::{IdentityRepository, RevocationRepository};
use acct_core::services::{
    AccountService, AccountServiceConfig, RevocationCleanupConfig, RevocationCleanupService,
    TokenService, TokenServiceConfig,
};
use acct_infra::database::{DatabasePool, MySqlIdentityRepository, MySqlRevocationRepository};
use acct_infra::{InMemoryIdentityRepository, InMemoryRevocationRepository};
use acct_shared::{AppConfig, DatabaseBackend, LogFormat, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging);

    info!(
        environment = ?config.environment,
        backend = ?config.database.backend,
        bind_address = %config.server.bind_address(),
        "Starting account service"
    );

    let problems = config.startup_problems();
    if !problems.is_empty() {
        for problem in &problems {
            error!(problem = %problem, "Invalid configuration");
        }
        bail!("refusing to start: {}", problems.join("; "));
    }
    if config.auth.jwt.is_using_default_secret() {
        warn!("Using the built-in signing secret; set ACCT__AUTH__JWT__SECRET");
    }

    match config.database.backend {
        DatabaseBackend::Memory => {
            warn!("Using in-memory stores; data is lost on shutdown");
            run(
                &config,
                Arc::new(InMemoryIdentityRepository::new()),
                Arc::new(InMemoryRevocationRepository::new()),
            )
            .await
        }
        DatabaseBackend::Mysql => {
            info!("Connecting to database...");
            let pool = DatabasePool::new(&config.database)
                .await
                .context("Failed to connect to database")?;
            pool.ensure_schema()
                .await
                .context("Failed to ensure database schema")?;
            info!(stats = %pool.get_statistics(), "Database connection established");

            let result = run(
                &config,
                Arc::new(MySqlIdentityRepository::new(pool.get_pool().clone())),
                Arc::new(MySqlRevocationRepository::new(pool.get_pool().clone())),
            )
            .await;

            pool.close().await;
            result
        }
    }
}

/// Wire services over the given stores and serve until shutdown
async fn run<I, R>(config: &AppConfig, identities: Arc<I>, ledger: Arc<R>) -> anyhow::Result<()>
where
    I: IdentityRepository + 'static,
    R: RevocationRepository + 'static,
{
    let token_service = TokenService::new(
        Arc::clone(&ledger),
        TokenServiceConfig::from(&config.auth.jwt),
    )
    .context("Invalid token configuration")?;
    let account_service = AccountService::new(
        identities,
        Arc::new(token_service),
        AccountServiceConfig::from(&config.auth),
    );
    let state = web::Data::new(AppState::new(Arc::new(account_service)));

    let cleanup = Arc::new(RevocationCleanupService::new(
        ledger,
        RevocationCleanupConfig::from_interval(config.auth.ledger_purge_interval_seconds),
    ));
    let cleanup_task = cleanup.start_background_task();

    let bind_address = config.server.bind_address();
    let mut server = HttpServer::new(move || create_app(state.clone()))
        .keep_alive(Duration::from_secs(config.server.keep_alive))
        .shutdown_timeout(config.server.shutdown_timeout);
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    info!(bind_address = %bind_address, "Account service listening");

    // actix-web handles SIGINT/SIGTERM and drains connections itself
    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server error")?;

    if let Some(task) = cleanup_task {
        task.abort();
    }

    info!("Account service shutdown complete");

    Ok(())
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init(),
    }
}
