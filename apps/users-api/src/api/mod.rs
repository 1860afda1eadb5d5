//! API routes module

pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// All API routes; `axum_helpers::create_router` nests them under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/users", users::router(state))
        .merge(health::router(state.clone()))
}
