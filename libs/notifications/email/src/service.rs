//! Turns a [`NotificationMessage`] into exactly one send attempt and one
//! stored [`EmailRecord`].

use crate::error::EmailResult;
use crate::message::NotificationMessage;
use crate::models::{EmailRecord, EmailResponse};
use crate::provider::EmailProvider;
use crate::repository::EmailRepository;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

pub struct EmailService<R: EmailRepository, P: EmailProvider> {
    repository: Arc<R>,
    provider: Arc<P>,
    sender: String,
}

impl<R: EmailRepository, P: EmailProvider> Clone for EmailService<R, P> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            provider: Arc::clone(&self.provider),
            sender: self.sender.clone(),
        }
    }
}

impl<R: EmailRepository, P: EmailProvider> EmailService<R, P> {
    pub fn new(repository: R, provider: P, sender: impl Into<String>) -> Self {
        Self::from_shared(Arc::new(repository), Arc::new(provider), sender)
    }

    pub fn from_shared(repository: Arc<R>, provider: Arc<P>, sender: impl Into<String>) -> Self {
        Self {
            repository,
            provider,
            sender: sender.into(),
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Attempt delivery once and record the outcome.
    ///
    /// A transport failure is not an error here: it is logged and stored as
    /// `FAILED` without a send date. Only a failing insert is returned as
    /// `Err`. Calling this twice with the same message sends and stores twice.
    pub async fn send_email(&self, message: &NotificationMessage) -> EmailResult<EmailRecord> {
        let mut record = EmailRecord::pending(message, &self.sender);

        match self.provider.send(&record.to_email()).await {
            Ok(result) => {
                record.mark_sent(Utc::now());
                info!(
                    user_id = %record.user_id,
                    to = %record.email_to,
                    message_id = %result.message_id,
                    provider = self.provider.name(),
                    "Email sent"
                );
            }
            Err(e) => {
                record.mark_failed();
                error!(
                    user_id = %record.user_id,
                    to = %record.email_to,
                    provider = self.provider.name(),
                    error = ?e,
                    "Email delivery failed"
                );
            }
        }

        let stored = self.repository.insert(record).await?;

        let response = EmailResponse::from(&stored);
        info!(
            user_id = %response.user_id,
            to = %response.email_to,
            status = %response.status_email,
            "Email record stored"
        );

        Ok(stored)
    }

    pub async fn list_for_user(&self, user_id: uuid::Uuid) -> EmailResult<Vec<EmailRecord>> {
        self.repository.list_by_user(user_id).await
    }
}
