use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    entity,
    error::{EmailError, EmailResult},
    models::EmailRecord,
    repository::EmailRepository,
};

#[derive(Clone)]
pub struct PgEmailRepository {
    db: DatabaseConnection,
}

impl PgEmailRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmailRepository for PgEmailRepository {
    async fn insert(&self, record: EmailRecord) -> EmailResult<EmailRecord> {
        let active_model: entity::ActiveModel = record.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| EmailError::Database(format!("Database error: {}", e)))?;

        tracing::debug!(email_id = %model.email_id, status = %model.status_email, "Stored email record");
        Ok(model.into())
    }

    async fn list_by_user(&self, user_id: Uuid) -> EmailResult<Vec<EmailRecord>> {
        let models = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| EmailError::Database(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::NotificationMessage;
    use crate::models::EmailStatus;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn model_for(record: &EmailRecord) -> entity::Model {
        entity::Model {
            email_id: record.email_id,
            user_id: record.user_id,
            email_from: record.email_from.clone(),
            email_to: record.email_to.clone(),
            email_subject: record.email_subject.clone(),
            email_body: record.email_body.clone(),
            send_date_email: record.send_date_email.map(Into::into),
            status_email: record.status_email,
        }
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let message = NotificationMessage::welcome(Uuid::new_v4(), "Ana", "ana@x.com");
        let mut record = EmailRecord::pending(&message, "noreply@x.com");
        record.mark_sent(chrono::Utc::now());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model_for(&record)]])
            .into_connection();
        let repo = PgEmailRepository::new(db);

        let stored = repo.insert(record.clone()).await.unwrap();
        assert_eq!(stored.email_id, record.email_id);
        assert_eq!(stored.status_email, EmailStatus::Sent);
    }

    #[tokio::test]
    async fn test_insert_maps_db_errors() {
        let message = NotificationMessage::welcome(Uuid::new_v4(), "Ana", "ana@x.com");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([sea_orm::DbErr::Custom("connection reset".into())])
            .into_connection();
        let repo = PgEmailRepository::new(db);

        let err = repo
            .insert(EmailRecord::pending(&message, "noreply@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, EmailError::Database(ref m) if m.contains("connection reset")));
    }
}
