//! Outbound notifications raised by user operations.

use async_trait::async_trait;
use email::NotificationMessage;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};

/// Publishes [`NotificationMessage`]s to the bus.
///
/// Implementations return only after the broker has accepted the message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserEventPublisher: Send + Sync {
    async fn publish(&self, message: &NotificationMessage) -> UserResult<()>;
}

/// Collects published messages in memory (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventPublisher {
    published: Arc<RwLock<Vec<NotificationMessage>>>,
    failure: Option<String>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every publish with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            published: Arc::default(),
            failure: Some(message.into()),
        }
    }

    pub async fn published(&self) -> Vec<NotificationMessage> {
        self.published.read().await.clone()
    }
}

#[async_trait]
impl UserEventPublisher for InMemoryEventPublisher {
    async fn publish(&self, message: &NotificationMessage) -> UserResult<()> {
        if let Some(failure) = &self.failure {
            return Err(UserError::Publish(failure.clone()));
        }
        self.published.write().await.push(message.clone());
        Ok(())
    }
}
