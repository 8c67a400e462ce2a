//! Email Worker Service (NATS JetStream)
//!
//! Drains the `user_created` stream and sends one welcome email per message.
//!
//! ```text
//! NATS JetStream (user_created, subject email.key)
//!   ↓ (durable pull consumer: email_queue)
//! NatsWorker<NotificationMessage, EmailProcessor>
//!   ↓
//! EmailService ─→ SmtpProvider (one attempt)
//!   ↓
//! tb_email (SENT or FAILED)
//! ```
//!
//! A failed SMTP attempt is recorded as FAILED and the message is still
//! acknowledged. Only storage errors cause redelivery.

pub mod config;

use config::WorkerSettings;
use core_config::app_info;
use database::postgres;
use email::{
    EmailProcessor, EmailProvider, EmailService, NotificationMessage, PgEmailRepository,
    SmtpProvider, UserCreatedStream,
};
use eyre::{Result, WrapErr};
use messaging::nats::{init_metrics, HealthServer, NatsWorker, WorkerConfig};
use migration::Migrator;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Run the email worker until SIGINT/SIGTERM.
///
/// # Errors
///
/// Fails when configuration is incomplete, when NATS or Postgres cannot be
/// reached, or when the SMTP transport cannot be built.
pub async fn run() -> Result<()> {
    core_config::tracing::install_color_eyre();

    let settings = WorkerSettings::from_env()?;
    core_config::tracing::init_tracing(&settings.environment);

    let metrics_handle = init_metrics().wrap_err("Failed to install Prometheus recorder")?;
    let app_info = app_info!();

    info!(
        name = %app_info.name,
        version = %app_info.version,
        environment = ?settings.environment,
        "Starting NATS email worker service"
    );

    info!(url = %settings.nats.url, "Connecting to NATS...");
    let nats_client = async_nats::connect(&settings.nats.url)
        .await
        .wrap_err_with(|| format!("Failed to connect to NATS at {}", settings.nats.url))?;
    let jetstream = async_nats::jetstream::new(nats_client);

    let db = postgres::connect_from_config_with_retry(settings.database.clone(), None)
        .await
        .wrap_err("PostgreSQL connection failed")?;

    if settings.run_migrations {
        postgres::run_migrations::<Migrator>(&db, app_info.name)
            .await
            .wrap_err("Database migrations failed")?;
    }

    let provider = SmtpProvider::from_env()?;
    if let Err(e) = provider.health_check().await {
        // The worker still starts; each send will record FAILED until SMTP is back.
        warn!(error = %e, "SMTP server is not reachable yet");
    }

    let service = EmailService::new(
        PgEmailRepository::new(db.clone()),
        provider,
        settings.email.from_address.clone(),
    );
    let processor = EmailProcessor::new(service);

    let worker_config = WorkerConfig::from_stream::<UserCreatedStream>();
    info!(
        stream = %worker_config.stream_name,
        consumer = %worker_config.durable_name,
        subject = %worker_config.subject,
        "Worker configuration loaded"
    );

    let health_server = HealthServer::new(settings.health_port).with_metrics(metrics_handle);
    let health_state = health_server.state();
    tokio::spawn(async move {
        if let Err(e) = health_server.run().await {
            error!(error = %e, "Health server failed");
        }
    });

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        axum_helpers::shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let worker = NatsWorker::<NotificationMessage, _>::new(jetstream, processor, worker_config)
        .await
        .wrap_err("Failed to create NATS worker")?
        .with_health(health_state);

    info!("NATS worker created, starting processing...");
    worker.run(shutdown_rx).await.wrap_err("NATS worker failed")?;

    if let Err(e) = db.close().await {
        warn!(error = %e, "Error closing PostgreSQL");
    }

    info!("NATS email worker service stopped");
    Ok(())
}
