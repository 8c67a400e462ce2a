//! `messaging::Processor` adapter for the email worker.

use crate::error::EmailError;
use crate::message::NotificationMessage;
use crate::provider::EmailProvider;
use crate::repository::EmailRepository;
use crate::service::EmailService;
use async_trait::async_trait;
use messaging::{ProcessingError, Processor};
use tracing::debug;

/// Consumes [`NotificationMessage`]s from the bus.
///
/// Every message is answered with `Ok` once its record is stored, whether or
/// not the mail went out. A storage failure is transient so the broker
/// redelivers the message.
pub struct EmailProcessor<R: EmailRepository, P: EmailProvider> {
    service: EmailService<R, P>,
}

impl<R: EmailRepository, P: EmailProvider> EmailProcessor<R, P> {
    pub fn new(service: EmailService<R, P>) -> Self {
        Self { service }
    }
}

impl From<EmailError> for ProcessingError {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::Database(_) => ProcessingError::transient(err.to_string()),
        }
    }
}

#[async_trait]
impl<R, P> Processor<NotificationMessage> for EmailProcessor<R, P>
where
    R: EmailRepository + 'static,
    P: EmailProvider + 'static,
{
    async fn process(&self, job: &NotificationMessage) -> Result<(), ProcessingError> {
        debug!(user_id = %job.user_id, to = %job.email_to, "Processing notification");

        self.service.send_email(job).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "email_processor"
    }

    async fn health_check(&self) -> Result<bool, ProcessingError> {
        self.service
            .provider()
            .health_check()
            .await
            .map(|_| true)
            .map_err(|e| ProcessingError::transient(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmailStatus;
    use crate::provider::MockSmtpProvider;
    use crate::repository::{InMemoryEmailRepository, MockEmailRepository};
    use messaging::ErrorCategory;
    use uuid::Uuid;

    fn message() -> NotificationMessage {
        NotificationMessage::welcome(Uuid::new_v4(), "Ana", "ana@x.com")
    }

    #[tokio::test]
    async fn test_transport_failure_still_acknowledges() {
        let repo = InMemoryEmailRepository::new();
        let service = EmailService::new(repo.clone(), MockSmtpProvider::failing("refused"), "noreply@x.com");
        let processor = EmailProcessor::new(service);

        processor.process(&message()).await.unwrap();

        let records = repo.all().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status_email, EmailStatus::Failed);
    }

    #[tokio::test]
    async fn test_storage_failure_is_transient() {
        let mut repo = MockEmailRepository::new();
        repo.expect_insert()
            .returning(|_| Err(EmailError::Database("pool timed out".to_string())));
        let service = EmailService::new(repo, MockSmtpProvider::new(), "noreply@x.com");
        let processor = EmailProcessor::new(service);

        let err = processor.process(&message()).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Transient);
    }

    #[tokio::test]
    async fn test_redelivery_creates_duplicate_records() {
        let repo = InMemoryEmailRepository::new();
        let provider = MockSmtpProvider::new();
        let service = EmailService::new(repo.clone(), provider.clone(), "noreply@x.com");
        let processor = EmailProcessor::new(service);
        let message = message();

        processor.process(&message).await.unwrap();
        processor.process(&message).await.unwrap();

        assert_eq!(repo.count().await, 2);
        assert_eq!(provider.attempt_count().await, 2);
    }

    #[tokio::test]
    async fn test_health_check_uses_provider() {
        let service = EmailService::new(
            InMemoryEmailRepository::new(),
            MockSmtpProvider::new(),
            "noreply@x.com",
        );
        let processor = EmailProcessor::new(service);

        assert!(processor.health_check().await.unwrap());
        assert_eq!(processor.name(), "email_processor");
    }
}
