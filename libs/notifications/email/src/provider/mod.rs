//! Mail transports

pub mod mock;
pub mod smtp;

pub use mock::MockSmtpProvider;
pub use smtp::{SmtpConfig, SmtpProvider};

use crate::models::Email;
use async_trait::async_trait;
use eyre::Result;

#[derive(Debug, Clone)]
pub struct SendResult {
    /// Transport-specific message ID
    pub message_id: String,
}

/// Sends one plain-text email. Errors are opaque reports.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send(&self, email: &Email) -> Result<SendResult>;

    async fn health_check(&self) -> Result<()>;

    fn name(&self) -> &'static str;
}
