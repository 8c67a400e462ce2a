//! User API
//!
//! HTTP surface for user registration. Every created user is stored in
//! Postgres and announced on the `user_created` JetStream stream, where the
//! email worker picks it up.
//!
//! ```text
//! POST /api/user ─→ UserService ─→ tb_user
//!                        └──────→ NatsEventPublisher ─→ user_created (email.key)
//! ```

pub mod config;
pub mod events;
pub mod openapi;
pub mod ready;
pub mod state;

use axum::Router;
use axum_helpers::server::{create_production_app, create_router, health_router};
use config::Config;
use core_config::AppInfo;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres;
use domain_users::{PgUserRepository, UserService, handlers};
use eyre::{Result, WrapErr};
use events::NatsEventPublisher;
use migration::Migrator;
use state::AppState;
use std::io;
use std::time::Duration;
use tracing::{error, info, warn};

/// Full application router: documented `/api` routes plus `/health` and the
/// given readiness routes.
pub fn app_router(users: Router, ready: Router, app: AppInfo) -> io::Result<Router> {
    Ok(create_router::<openapi::ApiDoc>(users)?
        .merge(health_router(app))
        .merge(ready))
}

/// Start the API and serve until SIGINT/SIGTERM.
pub async fn run() -> Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        name = %config.app.name,
        version = %config.app.version,
        environment = ?config.environment,
        "Starting user API"
    );

    let db = postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .wrap_err("PostgreSQL connection failed")?;

    if config.run_migrations {
        postgres::run_migrations::<Migrator>(&db, config.app.name)
            .await
            .wrap_err("Database migrations failed")?;
    }

    info!(url = %config.nats.url, "Connecting to NATS");
    let nats = async_nats::connect(&config.nats.url)
        .await
        .wrap_err_with(|| format!("Failed to connect to NATS at {}", config.nats.url))?;

    let publisher = NatsEventPublisher::new(async_nats::jetstream::new(nats.clone()));
    publisher
        .ensure_stream()
        .await
        .wrap_err("Failed to set up the user_created stream")?;

    let service = UserService::new(PgUserRepository::new(db.clone()), publisher)
        .with_sender(config.notification_sender.clone());

    let state = AppState { db, nats };
    let app = app_router(
        handlers::router(service),
        ready::ready_router(state.clone()),
        config.app,
    )?;

    info!("Starting user API with graceful shutdown (30s timeout)");

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: flushing NATS and closing database connections");
        if let Err(e) = state.nats.flush().await {
            warn!(error = %e, "Failed to flush NATS client");
        }
        match state.db.close().await {
            Ok(()) => info!("PostgreSQL connection closed"),
            Err(e) => error!(error = %e, "Error closing PostgreSQL"),
        }
    })
    .await
    .wrap_err("Server error")?;

    info!("User API shutdown complete");
    Ok(())
}
