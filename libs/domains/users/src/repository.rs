use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// All users, in no particular order
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Delete by id. `false` if nothing was deleted.
    async fn delete(&self, id: Uuid) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        self.users.write().await.insert(user.user_id, user.clone());
        Ok(user)
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateUser;

    #[tokio::test]
    async fn test_create_list_delete() {
        let repo = InMemoryUserRepository::new();
        let ana = repo
            .create(User::new(CreateUser::new("Ana", "ana@x.com")))
            .await
            .unwrap();
        repo.create(User::new(CreateUser::new("Bob", "bob@x.com")))
            .await
            .unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 2);
        assert!(repo.delete(ana.user_id).await.unwrap());
        assert!(!repo.delete(ana.user_id).await.unwrap());

        let remaining = repo.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Bob");
    }
}
