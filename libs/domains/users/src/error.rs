use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{AppError, ErrorCode, error_response_with_details};
use mongodb::error::{ErrorKind, WriteFailure};
use serde::Serialize;
use strum::{AsRefStr, Display};
use thiserror::Error;
use validator::ValidationErrors;

use crate::models::UserId;

/// MongoDB duplicate key error code
const DUPLICATE_KEY: i32 = 11000;

/// Why a create request was refused by the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ValidationReason {
    AgeTooLow,
    EmailConflict,
}

impl ValidationReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::AgeTooLow => "User must be at least 18 years old.",
            Self::EmailConflict => "Email already exists.",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::AgeTooLow => StatusCode::BAD_REQUEST,
            Self::EmailConflict => StatusCode::CONFLICT,
        }
    }

    fn error_code(&self) -> ErrorCode {
        match self {
            Self::AgeTooLow => ErrorCode::BusinessRule,
            Self::EmailConflict => ErrorCode::Conflict,
        }
    }
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("{}", .0.message())]
    Validation(ValidationReason),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn reason(&self) -> Option<ValidationReason> {
        match self {
            Self::Validation(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(ValidationReason::EmailConflict) => {
                AppError::Conflict(ValidationReason::EmailConflict.message().to_string())
            }
            UserError::Validation(reason) => AppError::BadRequest(reason.message().to_string()),
            UserError::InvalidInput(errors) => AppError::ValidationError(errors),
            UserError::NotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            UserError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match self {
            // Workflow rejections carry their reason in `details`
            UserError::Validation(reason) => {
                let code = reason.error_code();
                tracing::info!(error_code = code.code(), reason = %reason, "User request rejected");
                error_response_with_details(
                    reason.status(),
                    reason.message().to_string(),
                    code,
                    serde_json::json!({ "reason": reason }),
                )
            }
            other => AppError::from(other).into_response(),
        }
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err.kind) {
            return UserError::Validation(ValidationReason::EmailConflict);
        }
        UserError::Database(err.to_string())
    }
}

/// Only reachable when the unique email index is enabled
fn is_duplicate_key(kind: &ErrorKind) -> bool {
    match kind {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_reason_wire_names() {
        assert_eq!(ValidationReason::AgeTooLow.to_string(), "age_too_low");
        assert_eq!(ValidationReason::EmailConflict.as_ref(), "email_conflict");
        assert_eq!(
            serde_json::to_value(ValidationReason::EmailConflict).unwrap(),
            "email_conflict"
        );
    }

    #[tokio::test]
    async fn test_age_too_low_response() {
        let response = UserError::Validation(ValidationReason::AgeTooLow).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "User must be at least 18 years old.");
        assert_eq!(body["details"]["reason"], "age_too_low");
    }

    #[tokio::test]
    async fn test_email_conflict_response() {
        let response = UserError::Validation(ValidationReason::EmailConflict).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["error"], "CONFLICT");
        assert_eq!(body["details"]["reason"], "email_conflict");
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let response = UserError::NotFound(UserId::new("abc")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "User abc not found");
    }

    #[test]
    fn test_database_error_maps_to_500() {
        let response = UserError::Database("socket closed".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
