use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::EmailResult;
use crate::models::EmailRecord;

/// Persistence for attempted emails. Records are insert-only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailRepository: Send + Sync {
    /// Insert a new record and return it as stored
    async fn insert(&self, record: EmailRecord) -> EmailResult<EmailRecord>;

    /// All records addressed on behalf of `user_id`
    async fn list_by_user(&self, user_id: Uuid) -> EmailResult<Vec<EmailRecord>>;
}

/// In-memory implementation of EmailRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryEmailRepository {
    records: Arc<RwLock<HashMap<Uuid, EmailRecord>>>,
}

impl InMemoryEmailRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<EmailRecord> {
        self.records.read().await.values().cloned().collect()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl EmailRepository for InMemoryEmailRepository {
    async fn insert(&self, record: EmailRecord) -> EmailResult<EmailRecord> {
        self.records
            .write()
            .await
            .insert(record.email_id, record.clone());
        Ok(record)
    }

    async fn list_by_user(&self, user_id: Uuid) -> EmailResult<Vec<EmailRecord>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}
