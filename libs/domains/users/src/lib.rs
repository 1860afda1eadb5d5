//! Users Domain
//!
//! User management over a document store: create with field, age and email
//! uniqueness checks, then list, fetch, update and delete.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, JSON extraction, field rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Create workflow: age, then email uniqueness
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + MongoDB and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{handlers, MongoUserRepository, UserService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoUserRepository::new(client.database("app"));
//! let service = UserService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{UserError, UserResult, ValidationReason};
pub use handlers::ApiDoc;
pub use memory::InMemoryUserRepository;
pub use models::{CreateUser, UpdateUser, User, UserFilter, UserId};
pub use mongodb::MongoUserRepository;
pub use repository::UserRepository;
pub use service::{MIN_AGE, UserService};
pub use validation::validate_create_user;
