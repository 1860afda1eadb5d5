use async_trait::async_trait;

use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, User, UserFilter, UserId};

/// Repository trait for User persistence
///
/// Lookups by id return `Ok(None)` for ids the backend cannot parse, so a
/// malformed id reads the same as a missing one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist `input` exactly; the store assigns the id
    async fn insert(&self, input: CreateUser) -> UserResult<User>;

    /// First user matching `filter`
    async fn find_one(&self, filter: UserFilter) -> UserResult<Option<User>>;

    /// All users, in store order
    async fn find_all(&self) -> UserResult<Vec<User>>;

    async fn find_by_id(&self, id: UserId) -> UserResult<Option<User>>;

    /// Overwrite name and email; returns the updated record
    async fn update_by_id(&self, id: UserId, input: UpdateUser) -> UserResult<Option<User>>;

    /// Remove a user; returns the record as it was before deletion
    async fn delete_by_id(&self, id: UserId) -> UserResult<Option<User>>;
}
