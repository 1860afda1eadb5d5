//! User Service - the create workflow and CRUD pass-throughs

use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult, ValidationReason};
use crate::models::{CreateUser, UpdateUser, User, UserFilter, UserId};
use crate::repository::UserRepository;
use crate::validation::validate_create_user;

/// Minimum age accepted at creation
pub const MIN_AGE: i32 = 18;

/// User service providing business logic operations
///
/// Stateless apart from the shared repository handle; clones are cheap.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a user.
    ///
    /// Order: field rules, then age, then email uniqueness, then insert.
    /// Any rejection happens before the write; an age rejection touches
    /// the store not at all.
    #[instrument(skip(self, input), fields(user_email = %input.email))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        validate_create_user(&input)?;

        if input.age < MIN_AGE {
            return Err(UserError::Validation(ValidationReason::AgeTooLow));
        }

        let existing = self
            .repository
            .find_one(UserFilter::by_email(input.email.clone()))
            .await?;
        if existing.is_some() {
            return Err(UserError::Validation(ValidationReason::EmailConflict));
        }

        let user = self.repository.insert(input).await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: UserId) -> UserResult<User> {
        self.repository
            .find_by_id(id.clone())
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Overwrite name and email. No field, age or uniqueness checks run here.
    #[instrument(skip(self, input), fields(user_id = %id))]
    pub async fn update_user(&self, id: UserId, input: UpdateUser) -> UserResult<User> {
        self.repository
            .update_by_id(id.clone(), input)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Delete a user, returning the record as it was
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: UserId) -> UserResult<User> {
        self.repository
            .delete_by_id(id.clone())
            .await?
            .ok_or(UserError::NotFound(id))
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
