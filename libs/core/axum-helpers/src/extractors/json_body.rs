//! JSON extractor whose rejection uses the shared error body.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// Like `axum::Json`, but a malformed body is rejected as
/// [`AppError::JsonExtractorRejection`] so clients always get an
/// [`ErrorResponse`](crate::errors::ErrorResponse). No field rules run; use
/// [`ValidatedJson`](super::ValidatedJson) for that.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(data))
    }
}
