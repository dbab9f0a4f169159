use async_trait::async_trait;

use crate::user::{merge_patch, NewUser, User, UserId, UserProfile, UserUpdate};

use super::Result;

/// Repository for user operations.
///
/// Absence is always reported as `Ok(None)`; `Err` is reserved for backend
/// faults and invalid requests.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets every stored user. No ordering guarantee, no pagination.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Gets a user by id.
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Gets a user through the email index. The password is not projected.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserProfile>>;

    /// Creates a user, assigning its id. Writes unconditionally.
    async fn create_user(&self, user: &NewUser) -> Result<User>;

    /// Writes the fields present in `update` and returns the stored record.
    ///
    /// Fails with `InvalidData` when `update` is empty.
    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<Option<User>>;

    /// Deletes a user and returns its last stored state.
    async fn delete_user(&self, id: UserId) -> Result<Option<User>>;

    /// Merges `patch` over the stored record and writes every mutable field.
    ///
    /// Returns the merged record as computed before the write; it is not read
    /// back. The read and the write are not guarded, so concurrent patches of
    /// the same user race and the last write wins.
    async fn patch_user(&self, id: UserId, patch: &UserUpdate) -> Result<Option<User>> {
        let Some(existing) = self.get_user(id).await? else {
            return Ok(None);
        };

        let merged = merge_patch(&existing, patch);

        // Deleted between the read and the write.
        if self
            .update_user(id, &UserUpdate::from(&merged))
            .await?
            .is_none()
        {
            return Ok(None);
        }

        Ok(Some(merged))
    }
}
