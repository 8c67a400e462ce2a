use email::NotificationMessage;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::events::UserEventPublisher;
use crate::models::{CreateUser, User, UserResponse};
use crate::repository::UserRepository;

/// Service layer for user business logic
pub struct UserService<R: UserRepository, P: UserEventPublisher> {
    repository: Arc<R>,
    publisher: Arc<P>,
    /// Stamped on outgoing messages when configured
    sender: Option<String>,
}

impl<R: UserRepository, P: UserEventPublisher> UserService<R, P> {
    pub fn new(repository: R, publisher: P) -> Self {
        Self {
            repository: Arc::new(repository),
            publisher: Arc::new(publisher),
            sender: None,
        }
    }

    pub fn with_sender(mut self, sender: Option<String>) -> Self {
        self.sender = sender;
        self
    }

    /// Validate, persist, then publish exactly one welcome notification.
    ///
    /// Nothing is stored or published when validation fails. A publish
    /// failure is returned as [`UserError::Publish`] and leaves the stored
    /// user in place.
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        input.validate()?;

        let user = self.repository.create(User::new(input)).await?;

        let message = NotificationMessage::welcome(user.user_id, &user.name, &user.email)
            .with_sender(self.sender.clone());

        if let Err(e) = self.publisher.publish(&message).await {
            error!(user_id = %user.user_id, error = %e, "User stored but notification not published");
            return Err(e);
        }

        info!(user_id = %user.user_id, "User created and notification published");
        Ok(user.into())
    }

    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Remove a user. Email records referencing it are left alone.
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }
        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
