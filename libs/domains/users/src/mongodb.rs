//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::{IndexOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserFilter, UserId};
use crate::repository::UserRepository;

pub const DEFAULT_COLLECTION: &str = "users";
const EMAIL_INDEX_NAME: &str = "email_unique";

/// Stored shape: `_id` plus exactly the three user fields
#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    email: String,
    age: i32,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id.into(),
            name: doc.name,
            email: doc.email,
            age: doc.age,
        }
    }
}

impl From<ObjectId> for UserId {
    fn from(id: ObjectId) -> Self {
        UserId::new(id.to_hex())
    }
}

/// MongoDB implementation of the UserRepository
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// Repository over the `users` collection of `db`
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoUserRepository::new(client.database("app"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<UserDocument>(collection_name);
        Self { collection }
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    /// Create a unique index on `email`.
    ///
    /// Once present, a concurrent duplicate insert fails with a duplicate key
    /// error, reported as an email conflict. Idempotent.
    #[instrument(skip(self), fields(collection = %self.collection.name()))]
    pub async fn ensure_unique_email_index(&self) -> UserResult<()> {
        let options = IndexOptions::builder()
            .unique(true)
            .name(EMAIL_INDEX_NAME.to_string())
            .build();
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(options)
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Unique email index ensured");
        Ok(())
    }

    /// `None` when `id` is not a valid ObjectId
    fn parse_id(id: &UserId) -> Option<ObjectId> {
        ObjectId::parse_str(id.as_str()).ok()
    }

    fn build_filter(filter: &UserFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref email) = filter.email {
            doc.insert("email", email.clone());
        }

        doc
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, input), fields(user_email = %input.email))]
    async fn insert(&self, input: CreateUser) -> UserResult<User> {
        let result = self
            .collection
            .clone_with_type::<CreateUser>()
            .insert_one(&input)
            .await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            UserError::Database(format!(
                "insert returned non-ObjectId _id: {}",
                result.inserted_id
            ))
        })?;

        tracing::info!(user_id = %id, "User inserted");
        Ok(User {
            id: id.into(),
            name: input.name,
            email: input.email,
            age: input.age,
        })
    }

    #[instrument(skip(self))]
    async fn find_one(&self, filter: UserFilter) -> UserResult<Option<User>> {
        let user = self
            .collection
            .find_one(Self::build_filter(&filter))
            .await?;
        Ok(user.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> UserResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        let docs: Vec<UserDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn find_by_id(&self, id: UserId) -> UserResult<Option<User>> {
        let Some(oid) = Self::parse_id(&id) else {
            return Ok(None);
        };

        let user = self.collection.find_one(doc! { "_id": oid }).await?;
        Ok(user.map(User::from))
    }

    #[instrument(skip(self, input), fields(user_id = %id))]
    async fn update_by_id(&self, id: UserId, input: UpdateUser) -> UserResult<Option<User>> {
        let Some(oid) = Self::parse_id(&id) else {
            return Ok(None);
        };

        let update = doc! { "$set": { "name": input.name, "email": input.email } };
        let user = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, update)
            .return_document(ReturnDocument::After)
            .await?;

        if user.is_some() {
            tracing::info!("User updated");
        }
        Ok(user.map(User::from))
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn delete_by_id(&self, id: UserId) -> UserResult<Option<User>> {
        let Some(oid) = Self::parse_id(&id) else {
            return Ok(None);
        };

        let user = self
            .collection
            .find_one_and_delete(doc! { "_id": oid })
            .await?;

        if user.is_some() {
            tracing::info!("User deleted");
        }
        Ok(user.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_empty() {
        let doc = MongoUserRepository::build_filter(&UserFilter::default());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_with_email() {
        let doc = MongoUserRepository::build_filter(&UserFilter::by_email("ann@x.io"));
        assert_eq!(doc.get_str("email").unwrap(), "ann@x.io");
    }

    #[test]
    fn test_parse_id_rejects_malformed() {
        assert!(MongoUserRepository::parse_id(&UserId::new("abc")).is_none());
        assert!(MongoUserRepository::parse_id(&UserId::new("65f1c2a9e4b0a1b2c3d4e5f6")).is_some());
    }

    #[test]
    fn test_document_converts_to_user() {
        let oid = ObjectId::new();
        let user = User::from(UserDocument {
            id: oid,
            name: "Ann".to_string(),
            email: "ann@x.io".to_string(),
            age: 30,
        });
        assert_eq!(user.id.as_str(), oid.to_hex());
        assert_eq!(user.age, 30);
    }

    #[test]
    fn test_create_user_serializes_to_three_fields() {
        let input = CreateUser {
            name: "Ann".to_string(),
            email: "ann@x.io".to_string(),
            age: 30,
        };
        let doc = mongodb::bson::to_document(&input).unwrap();
        assert_eq!(doc.len(), 3);
        assert!(!doc.contains_key("_id"));
    }
}
