//! Welcome-email pipeline: the [`NotificationMessage`] contract published by
//! the user service, and the consumer side that sends each message once
//! over SMTP and records the outcome in `tb_email`.
//!
//! # Features
//!
//! - `worker` (default) - SMTP transport, `tb_email` storage, service and processor
//! - `nats` - [`UserCreatedStream`] topology for `messaging::nats`
//!
//! Publishers only need the contract:
//!
//! ```toml
//! email = { workspace = true, default-features = false, features = ["nats"] }
//! ```
//!
//! ```ignore
//! use email::{EmailProcessor, EmailService, PgEmailRepository, SmtpProvider, UserCreatedStream};
//! use messaging::nats::{NatsWorker, WorkerConfig};
//!
//! let service = EmailService::new(PgEmailRepository::new(db), SmtpProvider::from_env()?, from);
//! let config = WorkerConfig::from_stream::<UserCreatedStream>();
//! let worker = NatsWorker::new(jetstream, EmailProcessor::new(service), config).await?;
//! worker.run(shutdown_rx).await?;
//! ```

pub mod message;

#[cfg(feature = "nats")]
pub mod streams;

#[cfg(feature = "worker")]
pub mod config;
#[cfg(feature = "worker")]
pub mod entity;
#[cfg(feature = "worker")]
pub mod error;
#[cfg(feature = "worker")]
pub mod models;
#[cfg(feature = "worker")]
pub mod postgres;
#[cfg(feature = "worker")]
pub mod processor;
#[cfg(feature = "worker")]
pub mod provider;
#[cfg(feature = "worker")]
pub mod repository;
#[cfg(feature = "worker")]
pub mod service;

pub use message::{welcome_body, NotificationMessage, WELCOME_SUBJECT};

#[cfg(feature = "nats")]
pub use streams::UserCreatedStream;

#[cfg(feature = "worker")]
pub use config::EmailConfig;
#[cfg(feature = "worker")]
pub use error::{EmailError, EmailResult};
#[cfg(feature = "worker")]
pub use models::{Email, EmailRecord, EmailResponse, EmailStatus};
#[cfg(feature = "worker")]
pub use postgres::PgEmailRepository;
#[cfg(feature = "worker")]
pub use processor::EmailProcessor;
#[cfg(feature = "worker")]
pub use provider::{EmailProvider, MockSmtpProvider, SendResult, SmtpConfig, SmtpProvider};
#[cfg(feature = "worker")]
pub use repository::{EmailRepository, InMemoryEmailRepository};
#[cfg(feature = "worker")]
pub use service::EmailService;
