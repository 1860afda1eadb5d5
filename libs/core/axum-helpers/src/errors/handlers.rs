use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, error_body};

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    error_body(
        StatusCode::NOT_FOUND,
        "The requested resource was not found".to_string(),
        ErrorCode::NotFound,
        None,
    )
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    error_body(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::MethodNotAllowed.default_message().to_string(),
        ErrorCode::MethodNotAllowed,
        None,
    )
}
