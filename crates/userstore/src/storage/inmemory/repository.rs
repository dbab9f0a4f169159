//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use userstore_core::storage::{RepositoryError, Result, UserRepository};
use userstore_core::user::{
    select_email_match, NewUser, User, UserIdGenerator, UserId, UserProfile, UserUpdate,
};

/// In-memory storage backend.
///
/// Uses a HashMap wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    ids: Arc<UserIdGenerator>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn list_users(&self) -> Result<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserProfile>> {
        let users = self.users.read().await;
        let matches = users
            .values()
            .filter(|u| u.email == email)
            .map(User::profile)
            .collect();
        Ok(select_email_match(matches))
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let user = User::from_new(self.ids.next_id(), user.clone());
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<Option<User>> {
        if update.is_empty() {
            return Err(RepositoryError::InvalidData(
                "update must set at least one field".to_string(),
            ));
        }

        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|user| {
            update.apply_to(user);
            user.clone()
        }))
    }

    async fn delete_user(&self, id: UserId) -> Result<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> NewUser {
        NewUser::new("ann", "ann@example.com", "hunter2")
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryRepository::new();

        let created = repo.create_user(&ann()).await.unwrap();
        assert_eq!(created.username, "ann");
        assert_eq!(created.email, "ann@example.com");
        assert_eq!(created.password, "hunter2");

        let retrieved = repo.get_user(created.id).await.unwrap();
        assert_eq!(retrieved, Some(created));
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let repo = InMemoryRepository::new();

        let a = repo.create_user(&ann()).await.unwrap();
        let b = repo.create_user(&ann()).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(repo.list_users().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_ids_are_none() {
        let repo = InMemoryRepository::new();
        let update = UserUpdate::new().with_username("x");

        assert!(repo.get_user(1).await.unwrap().is_none());
        assert!(repo.update_user(1, &update).await.unwrap().is_none());
        assert!(repo.patch_user(1, &update).await.unwrap().is_none());
        assert!(repo.delete_user(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_writes_only_present_fields() {
        let repo = InMemoryRepository::new();
        let created = repo.create_user(&ann()).await.unwrap();

        let updated = repo
            .update_user(created.id, &UserUpdate::new().with_email("new@example.com"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.username, "ann");
        assert_eq!(updated.email, "new@example.com");
        assert_eq!(updated.password, "hunter2");
    }

    #[tokio::test]
    async fn test_update_empty_set_is_invalid() {
        let repo = InMemoryRepository::new();
        let created = repo.create_user(&ann()).await.unwrap();

        let result = repo.update_user(created.id, &UserUpdate::new()).await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_patch_merges_over_existing() {
        let repo = InMemoryRepository::new();
        let created = repo.create_user(&ann()).await.unwrap();

        let patched = repo
            .patch_user(created.id, &UserUpdate::new().with_username("u").with_email(" "))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(patched.username, "u");
        assert_eq!(patched.email, "ann@example.com");
        assert_eq!(repo.get_user(created.id).await.unwrap(), Some(patched));
    }

    #[tokio::test]
    async fn test_second_delete_is_none() {
        let repo = InMemoryRepository::new();
        let created = repo.create_user(&ann()).await.unwrap();

        assert_eq!(repo.delete_user(created.id).await.unwrap(), Some(created.clone()));
        assert!(repo.delete_user(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_returns_lowest_id() {
        let repo = InMemoryRepository::new();
        let first = repo.create_user(&ann()).await.unwrap();
        repo.create_user(&NewUser::new("ann2", "ann@example.com", "x"))
            .await
            .unwrap();

        let found = repo.get_user_by_email("ann@example.com").await.unwrap();

        assert_eq!(found, Some(first.profile()));
    }

    #[tokio::test]
    async fn test_get_by_email_missing_is_none() {
        let repo = InMemoryRepository::new();
        repo.create_user(&ann()).await.unwrap();

        assert!(repo
            .get_user_by_email("nobody@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_create_get_delete_scenario() {
        let repo = InMemoryRepository::new();

        let created = repo.create_user(&ann()).await.unwrap();
        assert_eq!(repo.get_user(created.id).await.unwrap(), Some(created.clone()));

        repo.delete_user(created.id).await.unwrap();
        assert!(repo.get_user(created.id).await.unwrap().is_none());
    }
}
