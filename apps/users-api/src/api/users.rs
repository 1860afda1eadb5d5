//! Users API routes

use axum::Router;
use domain_users::{MongoUserRepository, UserService, handlers};

use crate::state::AppState;

fn repository(state: &AppState) -> MongoUserRepository {
    MongoUserRepository::with_collection(state.db.clone(), &state.config.users.collection)
}

/// Create the unique email index when `USERS_UNIQUE_EMAIL_INDEX=true`
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    if !state.config.users.enforce_unique_email {
        tracing::info!("Unique email index disabled; uniqueness is checked on create only");
        return Ok(());
    }

    repository(state).ensure_unique_email_index().await?;
    Ok(())
}

pub fn router(state: &AppState) -> Router {
    let service = UserService::new(repository(state));
    handlers::router(service)
}
