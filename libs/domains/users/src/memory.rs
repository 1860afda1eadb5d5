//! In-process UserRepository for tests and local runs without MongoDB

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, User, UserFilter, UserId};
use crate::repository::UserRepository;

/// In-memory implementation of UserRepository
///
/// Ids are ObjectId hex strings, so `find_all` returns users in insertion order.
/// Like the MongoDB store without its unique index, it does not enforce email
/// uniqueness.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, input: CreateUser) -> UserResult<User> {
        let user = User {
            id: UserId::new(ObjectId::new().to_hex()),
            name: input.name,
            email: input.email,
            age: input.age,
        };

        self.users
            .write()
            .await
            .insert(user.id.clone(), user.clone());

        tracing::debug!(user_id = %user.id, "Stored user in memory");
        Ok(user)
    }

    async fn find_one(&self, filter: UserFilter) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        let user = users
            .values()
            .find(|u| filter.email.as_ref().is_none_or(|email| &u.email == email))
            .cloned();
        Ok(user)
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn update_by_id(&self, id: UserId, input: UpdateUser) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;
        let updated = users.get_mut(&id).map(|user| {
            user.name = input.name;
            user.email = input.email;
            user.clone()
        });
        Ok(updated)
    }

    async fn delete_by_id(&self, id: UserId) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, email: &str) -> CreateUser {
        CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            age: 30,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_object_id() {
        let repo = InMemoryUserRepository::new();
        let user = repo.insert(create("Ann", "ann@x.io")).await.unwrap();

        assert!(ObjectId::parse_str(user.id.as_str()).is_ok());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_one_matches_email_exactly() {
        let repo = InMemoryUserRepository::new();
        repo.insert(create("Ann", "ann@x.io")).await.unwrap();

        let found = repo.find_one(UserFilter::by_email("ann@x.io")).await.unwrap();
        assert_eq!(found.map(|u| u.name), Some("Ann".to_string()));

        let other_case = repo.find_one(UserFilter::by_email("ANN@x.io")).await.unwrap();
        assert!(other_case.is_none());
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let repo = InMemoryUserRepository::new();
        repo.insert(create("Ann", "ann@x.io")).await.unwrap();
        repo.insert(create("Bob", "bob@x.io")).await.unwrap();

        let names: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, ["Ann", "Bob"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_id() {
        let repo = InMemoryUserRepository::new();
        let id = UserId::new("not-an-id");
        let patch = UpdateUser {
            name: "X".to_string(),
            email: "x@x.io".to_string(),
        };

        assert!(repo.update_by_id(id.clone(), patch).await.unwrap().is_none());
        assert!(repo.delete_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_returns_pre_image() {
        let repo = InMemoryUserRepository::new();
        let user = repo.insert(create("Ann", "ann@x.io")).await.unwrap();

        let deleted = repo.delete_by_id(user.id.clone()).await.unwrap();
        assert_eq!(deleted, Some(user.clone()));
        assert!(repo.find_by_id(user.id).await.unwrap().is_none());
        assert!(repo.is_empty().await);
    }
}
