use super::{EmailProvider, SendResult};
use crate::models::Email;
use async_trait::async_trait;
use eyre::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-process transport that records every attempt.
///
/// A failing instance still records the attempt, so tests can count
/// sends on both paths.
#[derive(Clone, Default)]
pub struct MockSmtpProvider {
    attempts: Arc<Mutex<Vec<Email>>>,
    failure: Option<String>,
}

impl MockSmtpProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            attempts: Arc::default(),
            failure: Some(message.into()),
        }
    }

    pub async fn attempts(&self) -> Vec<Email> {
        self.attempts.lock().await.clone()
    }

    pub async fn attempt_count(&self) -> usize {
        self.attempts.lock().await.len()
    }

    pub async fn was_sent_to(&self, address: &str) -> bool {
        self.failure.is_none() && self.attempts.lock().await.iter().any(|e| e.to == address)
    }
}

#[async_trait]
impl EmailProvider for MockSmtpProvider {
    async fn send(&self, email: &Email) -> Result<SendResult> {
        let mut attempts = self.attempts.lock().await;
        attempts.push(email.clone());

        match &self.failure {
            Some(message) => Err(eyre::eyre!("{}", message)),
            None => Ok(SendResult {
                message_id: format!("mock-{}", attempts.len()),
            }),
        }
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
