use super::{EmailProvider, SendResult};
use crate::models::Email;
use async_trait::async_trait;
use core_config::{env_flag, env_or_default, env_parse, ConfigError, Environment, FromEnv};
use eyre::{Result, WrapErr};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use tracing::info;

/// Default per-command SMTP timeout, well inside the consumer's ack wait.
pub const DEFAULT_SMTP_TIMEOUT_SECS: u64 = 10;

/// SMTP connection settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub use_tls: bool,
    /// Per-command timeout for the SMTP conversation
    pub timeout_secs: u64,
}

impl SmtpConfig {
    /// Mailhog/Mailpit on localhost:1025, no auth.
    pub fn mailhog() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1025,
            username: String::new(),
            password: String::new(),
            use_tls: false,
            timeout_secs: DEFAULT_SMTP_TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl FromEnv for SmtpConfig {
    /// `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`, `SMTP_PASSWORD`, `SMTP_USE_TLS`,
    /// `SMTP_TIMEOUT_SECS`.
    ///
    /// Defaults point at Mailhog in development and at a TLS relay on 587
    /// in production.
    fn from_env() -> Result<Self, ConfigError> {
        let production = Environment::from_env().is_production();
        let (default_port, default_tls) = if production { ("587", true) } else { ("1025", false) };

        Ok(Self {
            host: env_or_default("SMTP_HOST", "localhost"),
            port: env_parse("SMTP_PORT", default_port)?,
            username: env_or_default("SMTP_USERNAME", ""),
            password: env_or_default("SMTP_PASSWORD", ""),
            use_tls: env_flag("SMTP_USE_TLS", default_tls),
            timeout_secs: env_parse(
                "SMTP_TIMEOUT_SECS",
                &DEFAULT_SMTP_TIMEOUT_SECS.to_string(),
            )?,
        })
    }
}

/// lettre-backed transport
pub struct SmtpProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpProvider {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let credentials = (!config.username.is_empty())
            .then(|| Credentials::new(config.username.clone(), config.password.clone()));

        let mut builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .wrap_err_with(|| format!("Failed to create SMTP relay for {}", config.host))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        }
        .port(config.port)
        .timeout(Some(config.timeout()));

        if let Some(credentials) = credentials {
            builder = builder.credentials(credentials);
        }

        info!(
            host = %config.host,
            port = config.port,
            tls = config.use_tls,
            timeout_secs = config.timeout_secs,
            "SMTP transport configured"
        );

        Ok(Self {
            transport: builder.build(),
        })
    }

    pub fn from_env() -> Result<Self> {
        let config = SmtpConfig::from_env().wrap_err("Invalid SMTP configuration")?;
        Self::new(&config)
    }

    fn build_message(email: &Email) -> Result<Message> {
        let from: Mailbox = email
            .from
            .parse()
            .wrap_err_with(|| format!("Invalid sender address '{}'", email.from))?;
        let to: Mailbox = email
            .to
            .parse()
            .wrap_err_with(|| format!("Invalid recipient address '{}'", email.to))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .wrap_err("Failed to build message")
    }
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    async fn send(&self, email: &Email) -> Result<SendResult> {
        let message = Self::build_message(email)?;

        let response = self
            .transport
            .send(message)
            .await
            .wrap_err("Failed to send email via SMTP")?;

        let message_id = response
            .message()
            .next()
            .map(str::to_string)
            .unwrap_or_default();

        Ok(SendResult { message_id })
    }

    async fn health_check(&self) -> Result<()> {
        let reachable = self
            .transport
            .test_connection()
            .await
            .wrap_err("SMTP health check failed")?;
        if !reachable {
            eyre::bail!("SMTP server did not accept the connection");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
